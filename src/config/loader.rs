use std::fs;
use std::path::{Path, PathBuf};

use super::{default_config_dir, Config};
use crate::error::{ErrorCode, LensError, LensResult};

/// Resolves and reads `config.toml`, then applies environment overrides
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    default_dir: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            default_dir: default_config_dir(),
        }
    }

    /// Use this file instead of the per-user default; it must exist
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn with_default_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.default_dir = dir;
        self
    }

    /// Load, merge env vars, validate
    pub fn load(&self) -> LensResult<Config> {
        let mut config = self.load_file()?;
        config.merge_env_vars();
        config.validate()?;
        Ok(config)
    }

    /// Load from disk only, without environment overrides or validation
    pub fn load_file(&self) -> LensResult<Config> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(LensError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    format!("config file {} does not exist", path.display()),
                ));
            }
            return Self::read(path);
        }

        match &self.default_dir {
            Some(dir) => {
                let path = dir.join("config.toml");
                if path.exists() {
                    Self::read(&path)
                } else {
                    tracing::debug!("No config at {}, using defaults", path.display());
                    Ok(Config::default())
                }
            }
            None => Ok(Config::default()),
        }
    }

    fn read(path: &Path) -> LensResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            LensError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("cannot read {}", path.display()),
            )
            .with_source(e)
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LensError::config_with_code(
                ErrorCode::CONFIG_PARSE_ERROR,
                format!("cannot parse {}", path.display()),
            )
            .with_source(e)
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_default_dir(Some(temp.path().to_path_buf()));
        assert_eq!(loader.load_file().unwrap(), Config::default());
    }

    #[test]
    fn test_reads_default_dir_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[channels]\nown_output = \"MyApp\"\n",
        )
        .unwrap();

        let loader = ConfigLoader::new().with_default_dir(Some(temp.path().to_path_buf()));
        let config = loader.load_file().unwrap();
        assert_eq!(config.channels.own_output, "MyApp");
        assert_eq!(config.channels.test_runner, "TestRunner");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::new().with_path(temp.path().join("nope.toml"));
        let err = loader.load_file().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[source\nprogram = ").unwrap();

        let err = ConfigLoader::new().with_path(&path).load_file().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
    }

    #[test]
    fn test_load_validates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("zero.toml");
        fs::write(&path, "[source]\nchunk_size = 0\n").unwrap();

        let err = ConfigLoader::new().with_path(&path).load().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_VALIDATION_FAILED);
    }
}
