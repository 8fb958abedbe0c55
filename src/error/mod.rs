use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for logcat-lens
#[derive(Error, Debug)]
pub enum LensError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Log source error: {message}")]
    Source {
        code: u16,
        message: String,
        command: Option<String>,
        exit_code: Option<i32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Terminal error: {message}")]
    Terminal {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Render error: {message}")]
    Render {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type LensResult<T> = Result<T, LensError>;

impl LensError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a log source error with specific code and the command involved
    pub fn source_with_code(code: u16, message: impl Into<String>, command: Option<String>) -> Self {
        Self::Source {
            code,
            message: message.into(),
            command,
            exit_code: None,
            source: None,
        }
    }

    pub fn terminal_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Terminal {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an exit code (only meaningful for source errors)
    pub fn with_exit_code(mut self, code: i32) -> Self {
        if let Self::Source { exit_code, .. } = &mut self {
            *exit_code = Some(code);
        }
        self
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        match &mut self {
            Self::Config { source, .. }
            | Self::Source { source, .. }
            | Self::Terminal { source, .. }
            | Self::Render { source, .. } => *source = Some(boxed),
        }
        self
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Source { code, .. }
            | Self::Terminal { code, .. }
            | Self::Render { code, .. } => *code,
        }
    }

    /// One-line description of this error's code
    pub fn describe(&self) -> &'static str {
        describe_error_code(self.code())
    }
}

impl From<std::io::Error> for LensError {
    fn from(err: std::io::Error) -> Self {
        LensError::Render {
            code: ErrorCode::RENDER_WRITE_FAILED,
            message: err.to_string(),
            source: None,
        }
        .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_code() {
        let err = LensError::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "bad toml");
        assert_eq!(err.to_string(), "[E1007] Configuration error: bad toml");
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
    }

    #[test]
    fn test_source_error_keeps_exit_code() {
        let err = LensError::source_with_code(
            ErrorCode::SOURCE_SUBPROCESS_FAILED,
            "clear failed",
            Some("adb logcat -c".to_string()),
        )
        .with_exit_code(2);

        match err {
            LensError::Source {
                exit_code, command, ..
            } => {
                assert_eq!(exit_code, Some(2));
                assert_eq!(command.as_deref(), Some("adb logcat -c"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_converts_to_render_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LensError = io.into();
        assert_eq!(err.code(), ErrorCode::RENDER_WRITE_FAILED);
        assert!(err.source().is_some());
        assert_eq!(err.describe(), "Writing to standard output failed");
    }
}
