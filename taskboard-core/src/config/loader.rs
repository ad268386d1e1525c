//! Configuration Loading for Taskboard Core.
//!
//! [`ConfigLoader`] locates `config.toml`, parses it, applies defaults and
//! validates the result.
//!
//! ```rust,ignore
//! use taskboard_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Logging level: {}", config.logging.level),
//!     Err(e) => {
//!         taskboard_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::paths::{get_app_state_dir, get_config_file_path};

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the application config directory (or the path
    /// in `TASKBOARD_CONFIG_PATH`). A missing file yields the defaults.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = get_config_file_path()?;
        Self::load_from_path(&path)
    }

    /// Loads and validates the configuration at `path`; a missing file yields
    /// the defaults.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No configuration file found, using defaults");
                CoreConfig::default()
            }
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }))
            }
        };
        Self::validate_config(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        Self::validate_config(Self::parse(content)?)
    }

    fn parse(content: &str) -> Result<CoreConfig, CoreError> {
        if content.trim().is_empty() {
            return Ok(CoreConfig::default());
        }
        toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))
    }

    /// Normalizes and validates a parsed configuration.
    ///
    /// Relative log file paths are resolved against the application state dir.
    pub fn validate_config(config: CoreConfig) -> Result<CoreConfig, CoreError> {
        let needs_state_dir = config
            .logging
            .file_path
            .as_ref()
            .map_or(false, |p| p.is_relative());
        let state_dir = if needs_state_dir { Some(get_app_state_dir()?) } else { None };
        Self::validate_config_with_state_dir(config, state_dir.as_deref())
    }

    pub(crate) fn validate_config_with_state_dir(
        mut config: CoreConfig,
        state_dir: Option<&Path>,
    ) -> Result<CoreConfig, CoreError> {
        let level = config.logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            return Err(validation_error(format!("Invalid log level: {}", config.logging.level)));
        }
        config.logging.level = level;

        let format = config.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format.as_str()) {
            return Err(validation_error(format!("Invalid log format: {}", config.logging.format)));
        }
        config.logging.format = format;

        if let Some(file_path) = config.logging.file_path.take() {
            config.logging.file_path = Some(resolve_relative(file_path, state_dir)?);
        }

        if config.theming.storage_key.trim().is_empty() {
            return Err(validation_error("theming.storage_key must not be empty".to_string()));
        }
        if config.theming.event_channel_capacity == 0 {
            return Err(validation_error(
                "theming.event_channel_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

fn resolve_relative(path: PathBuf, base: Option<&Path>) -> Result<PathBuf, CoreError> {
    if path.is_absolute() {
        return Ok(path);
    }
    match base {
        Some(base) => Ok(base.join(path)),
        None => Err(CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "App State".to_string(),
        })),
    }
}

fn validation_error(message: String) -> CoreError {
    CoreError::Config(ConfigError::ValidationError(message))
}
