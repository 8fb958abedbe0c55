use crate::classify::ClassifiedRecord;
use crate::config::TestRunConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum RunState {
    #[default]
    Idle,
    InRun { passed: bool, buffer: Vec<String> },
}

/// What observing one record did to the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Unchanged,
    Started,
    /// Run closed; these lines should be rendered in order
    Flushed(Vec<String>),
    /// Run closed as a short passing run; this many lines were dropped
    Discarded(usize),
}

/// Buffers everything logged during a test run and decides at the end
/// whether the run is worth showing.
#[derive(Debug, Clone)]
pub struct TestRunAggregator {
    runner: String,
    markers: TestRunConfig,
    state: RunState,
}

impl TestRunAggregator {
    pub fn new(runner: impl Into<String>, markers: TestRunConfig) -> Self {
        Self {
            runner: runner.into(),
            markers,
            state: RunState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RunState::InRun { .. })
    }

    /// Lines buffered so far, including the leading blank separator
    pub fn buffered(&self) -> &[String] {
        match &self.state {
            RunState::Idle => &[],
            RunState::InRun { buffer, .. } => buffer,
        }
    }

    pub fn observe(&mut self, record: &ClassifiedRecord) -> RunEvent {
        let from_runner = record.is_from(&self.runner);
        let message = record.message.as_str();

        match &mut self.state {
            RunState::Idle => {
                if from_runner && message.starts_with(&self.markers.started_marker) {
                    tracing::debug!("Test run started");
                    self.state = RunState::InRun {
                        passed: true,
                        buffer: vec![String::new()],
                    };
                    return RunEvent::Started;
                }
                RunEvent::Unchanged
            }
            RunState::InRun { passed, buffer } => {
                if from_runner && message.starts_with(&self.markers.finished_marker) {
                    let show = buffer.len() > self.markers.flush_threshold || !*passed;
                    let passed = *passed;
                    let mut buffer = std::mem::take(buffer);
                    buffer.push(message.to_string());
                    self.state = RunState::Idle;

                    tracing::debug!(passed, lines = buffer.len(), show, "Test run finished");
                    return if show {
                        RunEvent::Flushed(buffer)
                    } else {
                        RunEvent::Discarded(buffer.len())
                    };
                }

                buffer.push(message.to_string());
                if from_runner && message.starts_with(&self.markers.failed_marker) {
                    *passed = false;
                }
                RunEvent::Unchanged
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = RunState::Idle;
    }
}
