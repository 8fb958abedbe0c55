use directories::ProjectDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ErrorCode, LensError, LensResult};

pub mod loader;

pub use loader::ConfigLoader;

/// Banner logcat prints at the start of each log buffer, e.g.
/// `--------- beginning of /dev/log/main` or `--------- beginning of crash`.
pub const STREAM_BANNER_PATTERN: &str = r"^-+ beginning of ";

/// Directory holding `config.toml`, if a home directory can be determined
pub fn default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "logcat-lens", "logcat-lens").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub channels: ChannelConfig,
    pub test_run: TestRunConfig,
    pub keys: KeyConfig,
    pub noise_patterns: Vec<String>,
    pub log_level: Option<String>,
}

/// How the log source is launched and read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub program: String,
    pub args: Vec<String>,
    pub clear_args: Vec<String>,
    /// Device serial, passed as `-s <serial>` ahead of the args
    pub device: Option<String>,
    /// Bytes per non-blocking read
    pub chunk_size: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            program: "adb".to_string(),
            args: vec!["logcat".to_string()],
            clear_args: vec!["logcat".to_string(), "-c".to_string()],
            device: None,
            // Small reads keep multi-line bursts (stack traces) flowing line by line
            chunk_size: 10,
        }
    }
}

/// Owner names with special meaning to the filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelConfig {
    pub own_output: String,
    pub runtime_errors: String,
    pub test_runner: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            own_output: "System.out".to_string(),
            runtime_errors: "AndroidRuntime".to_string(),
            test_runner: "TestRunner".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestRunConfig {
    pub started_marker: String,
    pub failed_marker: String,
    pub finished_marker: String,
    /// Passing runs are shown only when their buffer grows past this size
    pub flush_threshold: usize,
}

impl Default for TestRunConfig {
    fn default() -> Self {
        Self {
            started_marker: "started:".to_string(),
            failed_marker: "failed:".to_string(),
            finished_marker: "finished:".to_string(),
            flush_threshold: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub quit: char,
    pub restart: char,
    pub poll_interval_ms: u64,
    pub idle_pause_ms: u64,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            restart: 'c',
            poll_interval_ms: 250,
            idle_pause_ms: 2,
        }
    }
}

impl KeyConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn idle_pause(&self) -> Duration {
        Duration::from_millis(self.idle_pause_ms)
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `LOGCAT_LENS_*` overrides from an arbitrary lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOGCAT_LENS_LOG_LEVEL") {
            self.log_level = Some(level);
        }

        if let Some(program) = lookup("LOGCAT_LENS_ADB") {
            self.source.program = program;
        }

        if let Some(device) = lookup("LOGCAT_LENS_DEVICE") {
            self.source.device = Some(device).filter(|d| !d.is_empty());
        }
    }

    pub fn validate(&self) -> LensResult<()> {
        if self.source.program.trim().is_empty() {
            return Err(invalid("source.program must not be empty"));
        }
        if self.source.chunk_size == 0 {
            return Err(invalid("source.chunk_size must be at least 1"));
        }
        for (name, value) in [
            ("channels.own_output", &self.channels.own_output),
            ("channels.runtime_errors", &self.channels.runtime_errors),
            ("channels.test_runner", &self.channels.test_runner),
        ] {
            if value.is_empty() {
                return Err(invalid(format!("{name} must not be empty")));
            }
        }
        if self.keys.quit == self.keys.restart {
            return Err(invalid(format!(
                "keys.quit and keys.restart are both '{}'",
                self.keys.quit
            )));
        }
        self.compiled_noise_patterns()?;
        Ok(())
    }

    /// The built-in stream banner followed by any configured patterns
    pub fn compiled_noise_patterns(&self) -> LensResult<Vec<Regex>> {
        std::iter::once(STREAM_BANNER_PATTERN)
            .chain(self.noise_patterns.iter().map(String::as_str))
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    LensError::config_with_code(
                        ErrorCode::CONFIG_INVALID_PATTERN,
                        format!("invalid noise pattern '{pattern}'"),
                    )
                    .with_source(e)
                })
            })
            .collect()
    }
}

fn invalid(message: impl Into<String>) -> LensError {
    LensError::config_with_code(ErrorCode::CONFIG_VALIDATION_FAILED, message)
}
