//! Configuration Data Structures for Taskboard Core.
//!
//! These structs are populated by deserializing `config.toml`. Missing fields
//! take their values from [`super::defaults`]; unknown fields are rejected.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use taskboard_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/taskboard.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/taskboard.log")));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// Valid values (case-insensitive): "text", "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Where and how the theme collection is persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemingSettings {
    /// Key under which the whole theme collection is stored.
    #[serde(default = "defaults::default_theme_storage_key")]
    pub storage_key: String,
    /// Directory for the file-backed key-value store. Defaults to the app data dir.
    #[serde(default = "defaults::default_theme_data_dir")]
    pub data_dir: Option<PathBuf>,
    /// Capacity of the theme change broadcast channels.
    #[serde(default = "defaults::default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for ThemingSettings {
    fn default() -> Self {
        defaults::default_theming_settings()
    }
}

/// Root configuration structure.
///
/// ```
/// use taskboard_core::config::CoreConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [theming]
/// storage_key = "board-themes"
/// "#;
/// let loaded_config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(loaded_config.logging.level, "warn");
/// assert_eq!(loaded_config.theming.storage_key, "board-themes");
/// assert_eq!(loaded_config.theming.event_channel_capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_theming_settings")]
    pub theming: ThemingSettings,
}
