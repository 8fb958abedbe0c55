//! Application configuration
//!
//! Settings that come from the command line rather than `config.toml`.

use std::path::PathBuf;

use crate::config::{Config, ConfigLoader};
use crate::error::LensResult;

/// Command-line settings for one invocation
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Clear the device log before the first loop
    pub clear_first: bool,
    /// Explicit path to `config.toml`
    pub config_path: Option<PathBuf>,
    /// Device serial overriding the configured one
    pub device: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear_first = clear;
        self
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    /// Filter directive for the verbosity, or None at the default level
    pub fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Load `config.toml` and apply command-line overrides
    pub fn load_config(&self) -> LensResult<Config> {
        let loader = match &self.config_path {
            Some(path) => ConfigLoader::new().with_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load()?;
        if let Some(device) = &self.device {
            config.source.device = Some(device.clone());
        }
        Ok(config)
    }
}
