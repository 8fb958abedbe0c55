use std::collections::VecDeque;

use super::source::{LogSource, ReadOutcome};
use crate::error::LensResult;

/// One scripted reply to `try_read`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Bytes(Vec<u8>),
    WouldBlock,
    Closed,
}

/// In-memory [`LogSource`] that replays a fixed script.
///
/// Bytes larger than the caller's buffer are served across several reads.
/// Once the script runs out every read would block, unless it ended with
/// `Closed`, which then repeats.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
    closed: bool,
    reads: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.steps.push_back(ScriptStep::Bytes(bytes.as_ref().to_vec()));
        self
    }

    /// A full line, newline appended
    pub fn line(self, line: &str) -> Self {
        self.bytes(format!("{line}\n"))
    }

    pub fn would_block(mut self) -> Self {
        self.steps.push_back(ScriptStep::WouldBlock);
        self
    }

    pub fn closed(mut self) -> Self {
        self.steps.push_back(ScriptStep::Closed);
        self
    }

    /// Number of `try_read` calls so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }
}

impl LogSource for ScriptedSource {
    fn try_read(&mut self, buf: &mut [u8]) -> LensResult<ReadOutcome> {
        self.reads += 1;
        if self.closed {
            return Ok(ReadOutcome::Closed);
        }

        match self.steps.pop_front() {
            None => Ok(ReadOutcome::WouldBlock),
            Some(ScriptStep::WouldBlock) => Ok(ReadOutcome::WouldBlock),
            Some(ScriptStep::Closed) => {
                self.closed = true;
                Ok(ReadOutcome::Closed)
            }
            Some(ScriptStep::Bytes(bytes)) if bytes.is_empty() => Ok(ReadOutcome::WouldBlock),
            Some(ScriptStep::Bytes(mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    let rest = bytes.split_off(n);
                    self.steps.push_front(ScriptStep::Bytes(rest));
                }
                Ok(ReadOutcome::Data(n))
            }
        }
    }
}
