//! Default configuration values for Taskboard Core.
//!
//! Referenced from `#[serde(default = "...")]` attributes in [`super::types`].

use crate::config::types::{LoggingConfig, ThemingSettings};
use std::path::PathBuf;

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_theming_settings() -> ThemingSettings {
    ThemingSettings {
        storage_key: default_theme_storage_key(),
        data_dir: default_theme_data_dir(),
        event_channel_capacity: default_event_channel_capacity(),
    }
}

/// The single durable key that holds the whole theme collection.
pub(crate) fn default_theme_storage_key() -> String {
    "themes".to_string()
}

/// `None` means "the application data directory".
pub(crate) fn default_theme_data_dir() -> Option<PathBuf> {
    None
}

pub(crate) fn default_event_channel_capacity() -> usize {
    16
}
