use crate::classify::{ClassifiedRecord, Directive};

/// The pid currently believed to belong to the operator's own app
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessIdentity {
    current: Option<String>,
}

impl ProcessIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-anchor on a `!!START!!` from the own-output channel.
    ///
    /// Returns true when the identity was re-anchored; the caller clears the
    /// screen in that case.
    pub fn observe(&mut self, record: &ClassifiedRecord, own_output: &str) -> bool {
        if !record.is_from(own_output) || !record.has_directive(&Directive::Start) {
            return false;
        }

        if self.current.as_deref() != Some(record.pid.as_str()) {
            tracing::debug!(
                previous = ?self.current,
                pid = %record.pid,
                "App process identity re-anchored"
            );
        }
        self.current = Some(record.pid.clone());
        true
    }

    pub fn current_pid(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// True if an identity is known and `pid` is not it
    pub fn is_stale(&self, pid: &str) -> bool {
        self.current.as_deref().is_some_and(|current| current != pid)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
