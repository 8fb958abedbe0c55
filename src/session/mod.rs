//! Per-connection filtering state
//!
//! A [`Session`] owns everything that changes while the log streams: the
//! partial-line tail, the app's process identity and the test-run buffer.
//! It lives from one loop start until quit or restart.

use std::io::Write;

use crate::classify::{Classification, ClassifiedRecord, Directive, LineClassifier};
use crate::config::Config;
use crate::error::LensResult;
use crate::filter::{FilterPolicy, FilterRule, ProcessIdentity, RunEvent, TestRunAggregator};
use crate::render::Renderer;
use crate::stream::LineReassembler;

/// What happened to one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Rendered,
    Suppressed(FilterRule),
    Noise,
    Unmatched,
}

pub struct Session {
    reassembler: LineReassembler,
    classifier: LineClassifier,
    policy: FilterPolicy,
    identity: ProcessIdentity,
    test_run: TestRunAggregator,
}

impl Session {
    pub fn new(config: &Config) -> LensResult<Self> {
        Ok(Self {
            reassembler: LineReassembler::new(),
            classifier: LineClassifier::new(config.compiled_noise_patterns()?),
            policy: FilterPolicy::new(&config.channels),
            identity: ProcessIdentity::new(),
            test_run: TestRunAggregator::new(
                config.channels.test_runner.clone(),
                config.test_run.clone(),
            ),
        })
    }

    /// Feed raw bytes; every completed line is processed in arrival order
    pub fn ingest<W: Write>(
        &mut self,
        chunk: &[u8],
        renderer: &mut Renderer<W>,
    ) -> LensResult<Vec<LineOutcome>> {
        self.reassembler
            .feed(chunk)
            .iter()
            .map(|line| self.process_line(&line.to_text(), renderer))
            .collect()
    }

    pub fn process_line<W: Write>(
        &mut self,
        line: &str,
        renderer: &mut Renderer<W>,
    ) -> LensResult<LineOutcome> {
        match self.classifier.classify(line) {
            Classification::Record(record) => self.process_record(&record, renderer),
            Classification::Noise => Ok(LineOutcome::Noise),
            Classification::Unmatched(raw) => {
                renderer.unmatched(&raw)?;
                Ok(LineOutcome::Unmatched)
            }
        }
    }

    fn process_record<W: Write>(
        &mut self,
        record: &ClassifiedRecord,
        renderer: &mut Renderer<W>,
    ) -> LensResult<LineOutcome> {
        // Chatter never reaches identity, test runs or directives
        if record.severity.is_chatter() {
            return Ok(LineOutcome::Suppressed(FilterRule::Chatter));
        }

        if self.identity.observe(record, self.policy.own_output()) {
            renderer.clear_screen()?;
        }

        match self.test_run.observe(record) {
            RunEvent::Flushed(lines) => {
                for line in &lines {
                    renderer.line(line)?;
                }
            }
            RunEvent::Discarded(count) => {
                tracing::debug!(count, "Dropped output of a short passing test run");
            }
            RunEvent::Started | RunEvent::Unchanged => {}
        }

        let decision = self
            .policy
            .decide(record, &self.identity, self.test_run.is_active());
        if decision.allow {
            renderer.line(&decision.message)?;
        }

        if record.has_directive(&Directive::Cls) {
            renderer.clear_screen()?;
        }

        Ok(if decision.allow {
            LineOutcome::Rendered
        } else {
            LineOutcome::Suppressed(decision.rule)
        })
    }

    /// Forget the partial line, identity and any open test run
    pub fn reset(&mut self) {
        self.reassembler.reset();
        self.identity.reset();
        self.test_run.reset();
    }

    pub fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    pub fn test_run_active(&self) -> bool {
        self.test_run.is_active()
    }

    pub fn pending(&self) -> &[u8] {
        self.reassembler.pending()
    }
}
