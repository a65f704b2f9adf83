use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ParserConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ParserConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/cmdargs/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cmdargs").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `ParserConfig::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(ParserConfig::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ParserConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!("Loaded parser config from {}", path.display());
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The file prefix is a single character other than `-`
    /// - The clear token is not empty
    /// - Argument files may nest at least one level
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.file_prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "file_prefix must be a single character other than '-', got '{}'",
                        self.file_prefix
                    ),
                });
            }
        }

        if self.clear_token.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "clear_token must not be empty".to_string(),
            });
        }

        if self.max_file_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_file_depth must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "clear_token = \"NULL\"\nversion = \"1.2.3\"\n").unwrap();

        let config = ParserConfig::load_from(&path).unwrap();
        assert_eq!(config.clear_token, "NULL");
        assert_eq!(config.version.as_deref(), Some("1.2.3"));
        assert_eq!(config.file_prefix, "@");
        assert_eq!(config.max_file_depth, 16);
    }

    #[test]
    fn test_load_from_rejects_dash_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "file_prefix = \"-\"\n").unwrap();

        match ParserConfig::load_from(&path) {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains("file_prefix"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "invalid { toml }").unwrap();

        assert!(matches!(
            ParserConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ParserConfig::load_from(Path::new("/nonexistent/cmdargs/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
