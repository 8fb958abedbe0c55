use std::fmt;

/// Log priority, from the single letter before the `/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
    Unknown,
}

impl Severity {
    /// Any uppercase ASCII letter is a severity; unrecognised ones are `Unknown`
    pub fn from_letter(letter: char) -> Option<Self> {
        if !letter.is_ascii_uppercase() {
            return None;
        }
        Some(match letter {
            'V' => Self::Verbose,
            'D' => Self::Debug,
            'I' => Self::Info,
            'W' => Self::Warning,
            'E' => Self::Error,
            'F' => Self::Fatal,
            _ => Self::Unknown,
        })
    }

    /// Severities that are never shown
    pub fn is_chatter(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// In-band control word from a `!!WORD!!` message prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// The app (re)started: re-anchor its pid and clear the screen
    Start,
    /// Clear the screen after this line
    Cls,
    /// Stripped from the message but otherwise ignored
    Other(String),
}

impl Directive {
    pub fn from_word(word: &str) -> Self {
        match word {
            "START" => Self::Start,
            "CLS" => Self::Cls,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "START",
            Self::Cls => "CLS",
            Self::Other(word) => word,
        }
    }
}

/// A log line split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub severity: Severity,
    pub owner: String,
    pub pid: String,
    pub message: String,
    pub directive: Option<Directive>,
}

impl ClassifiedRecord {
    pub fn is_from(&self, owner: &str) -> bool {
        self.owner == owner
    }

    pub fn has_directive(&self, directive: &Directive) -> bool {
        self.directive.as_ref() == Some(directive)
    }
}

/// Outcome of classifying one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Record(ClassifiedRecord),
    /// Known harmless line, dropped silently
    Noise,
    /// Unexpected shape; shown with a marker so it gets noticed
    Unmatched(String),
}
