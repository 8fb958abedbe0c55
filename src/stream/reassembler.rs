//! Reassembly of newline-delimited lines from arbitrarily chunked reads

/// A complete line, without its terminating `\n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine(Vec<u8>);

impl LogLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Lossy UTF-8 text with a single trailing `\r` removed
    pub fn to_text(&self) -> String {
        let bytes = self.0.strip_suffix(b"\r").unwrap_or(&self.0);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl From<&str> for LogLine {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// Holds the unterminated tail of the stream between reads.
///
/// Every byte fed in either ends up in exactly one emitted [`LogLine`]
/// (newlines excepted) or is still held in the tail.
#[derive(Debug, Default)]
pub struct LineReassembler {
    tail: Vec<u8>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every line it completes, in order
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<LogLine> {
        if chunk.is_empty() {
            return Vec::new();
        }

        // Only the new bytes can contain a newline we haven't seen yet
        let scan_from = self.tail.len();
        self.tail.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        let mut cursor = scan_from;
        while let Some(offset) = self.tail[cursor..].iter().position(|&b| b == b'\n') {
            let newline = cursor + offset;
            lines.push(LogLine(self.tail[start..newline].to_vec()));
            start = newline + 1;
            cursor = start;
        }

        if start > 0 {
            self.tail.drain(..start);
        }
        lines
    }

    /// Bytes received since the last newline
    pub fn pending(&self) -> &[u8] {
        &self.tail
    }

    pub fn reset(&mut self) {
        self.tail.clear();
    }
}
