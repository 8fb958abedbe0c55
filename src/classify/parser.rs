//! Line grammar: `<Severity>/<Owner>(<Pid>): <Message>`
//!
//! The owner may itself contain `(`, `)`, `.` and `:`, so the owner/pid
//! boundary is the *rightmost* well-formed `(<digits>):` in the line.

use regex::Regex;

use super::record::{Classification, ClassifiedRecord, Directive, Severity};

/// Splits lines into records, recognising known noise
#[derive(Debug, Clone)]
pub struct LineClassifier {
    noise: Vec<Regex>,
}

impl LineClassifier {
    pub fn new(noise: Vec<Regex>) -> Self {
        Self { noise }
    }

    pub fn classify(&self, line: &str) -> Classification {
        if let Some(record) = parse_record(line) {
            return Classification::Record(record);
        }
        if self.noise.iter().any(|pattern| pattern.is_match(line)) {
            return Classification::Noise;
        }
        Classification::Unmatched(line.to_string())
    }
}

/// Parse a line of the primary shape, extracting any leading directive
pub fn parse_record(line: &str) -> Option<ClassifiedRecord> {
    let mut chars = line.chars();
    let severity = Severity::from_letter(chars.next()?)?;
    let rest = chars.as_str().strip_prefix('/')?;

    let (owner, pid, message) = split_owner(rest)?;
    let (directive, message) = match split_directive(message) {
        Some((word, remainder)) => (Some(Directive::from_word(word)), remainder),
        None => (None, message),
    };

    Some(ClassifiedRecord {
        severity,
        owner: owner.to_string(),
        pid: pid.to_string(),
        message: message.to_string(),
        directive,
    })
}

/// Find the last `(<spaces><digits>):` with a non-empty owner before it
fn split_owner(rest: &str) -> Option<(&str, &str, &str)> {
    let bytes = rest.as_bytes();
    let mut search_end = rest.len();

    while let Some(close) = rest[..search_end].rfind("):") {
        search_end = close;

        let digits_start = bytes[..close]
            .iter()
            .rposition(|b| !b.is_ascii_digit())
            .map_or(0, |i| i + 1);
        if digits_start == close {
            continue;
        }

        // Older logcat pads the pid: `I/Tag(  123): ...`
        let open = bytes[..digits_start]
            .iter()
            .rposition(|&b| b != b' ')
            .filter(|&i| bytes[i] == b'(');
        let Some(open) = open else { continue };
        if open == 0 {
            continue;
        }

        let message = &rest[close + 2..];
        let message = strip_one_space(message);
        return Some((&rest[..open], &rest[digits_start..close], message));
    }
    None
}

fn strip_one_space(s: &str) -> &str {
    match s.chars().next() {
        Some(c) if c.is_ascii_whitespace() => &s[1..],
        _ => s,
    }
}

/// `!!WORD!!rest` → `(WORD, rest)` for a non-empty uppercase WORD
pub fn split_directive(message: &str) -> Option<(&str, &str)> {
    let body = message.strip_prefix("!!")?;
    let end = body.find("!!")?;
    let word = &body[..end];
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Some((word, &body[end + 2..]))
}
