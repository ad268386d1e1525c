use taskboard_core::CoreError;
use thiserror::Error;

use super::types::ThemeId;

/// Failures surfaced by the theme store, the codec and the controller.
///
/// Storage errors are carried as rendered messages so the error stays
/// `Clone` and can be compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemingError {
    #[error("Theme with ID '{theme_id}' not found")]
    NotFound { theme_id: ThemeId },

    #[error("Theme '{theme_id}' is the default theme and cannot be deleted")]
    DefaultThemeProtected { theme_id: ThemeId },

    #[error("Malformed theme: {reason}")]
    MalformedTheme { reason: String },

    #[error("Failed to persist themes during {operation}: {message}")]
    PersistenceFailure { operation: String, message: String },

    #[error("Theme '{theme_id}' was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        theme_id: ThemeId,
        expected: u64,
        actual: u64,
    },
}

impl ThemingError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ThemingError::MalformedTheme { reason: reason.into() }
    }

    pub fn persistence(operation: &str, source: &CoreError) -> Self {
        ThemingError::PersistenceFailure {
            operation: operation.to_string(),
            message: source.to_string(),
        }
    }
}
