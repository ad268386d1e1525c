//! Portable JSON documents for exporting and importing themes.
//!
//! Documents carry the name, description and token maps only. Identity,
//! provenance and flags are left out so an exported theme can be imported
//! as a new record anywhere.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taskboard_core::CoreError;
use tokio::fs;
use tracing::{debug, info};

use super::errors::ThemingError;
use super::merge;
use super::tokens::{ColorRole, PartialTokenMap, RadiusScale, ShadowScale, SpacingScale};
use super::types::{PartialThemeTokens, PartialTypography, Theme};

/// Wire shape of an exported theme.
///
/// Token maps may be partial on import; unknown token keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub colors: PartialTokenMap<ColorRole>,
    pub typography: PartialTypography,
    pub spacing: PartialTokenMap<SpacingScale>,
    pub border_radius: PartialTokenMap<RadiusScale>,
    pub shadows: PartialTokenMap<ShadowScale>,
}

impl From<&Theme> for ThemeDocument {
    fn from(theme: &Theme) -> Self {
        let patch = merge::theme_to_patch(theme);
        Self {
            name: theme.name.clone(),
            description: theme.description.clone(),
            colors: patch.colors,
            typography: patch.typography,
            spacing: patch.spacing,
            border_radius: patch.border_radius,
            shadows: patch.shadows,
        }
    }
}

impl From<ThemeDocument> for PartialThemeTokens {
    fn from(doc: ThemeDocument) -> Self {
        PartialThemeTokens {
            name: Some(doc.name),
            description: Some(doc.description),
            colors: doc.colors,
            typography: doc.typography,
            spacing: doc.spacing,
            border_radius: doc.border_radius,
            shadows: doc.shadows,
            is_active: None,
            created_by: None,
        }
    }
}

/// Renders `theme` as a pretty-printed JSON document.
pub fn export_theme(theme: &Theme) -> Result<String, ThemingError> {
    serde_json::to_string_pretty(&ThemeDocument::from(theme))
        .map_err(|e| ThemingError::malformed(format!("failed to encode theme '{}': {}", theme.name, e)))
}

/// Parses and validates a document. The result still has to go through
/// `ThemeStore::create` to become a record.
pub fn import_theme(json: &str) -> Result<PartialThemeTokens, ThemingError> {
    let doc: ThemeDocument =
        serde_json::from_str(json).map_err(|e| ThemingError::malformed(format!("invalid theme document: {}", e)))?;
    let patch = PartialThemeTokens::from(doc);
    merge::validate_patch(&patch)?;
    debug!(name = ?patch.name, "Imported theme document");
    Ok(patch)
}

/// `Ocean Breeze` becomes `ocean-breeze-theme.json`.
pub fn export_file_name(theme: &Theme) -> String {
    let stem: String = theme
        .name
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let stem = if stem.is_empty() { "theme".to_string() } else { stem };
    format!("{}-theme.json", stem)
}

/// Writes the export of `theme` into `dir` and returns the file path.
pub async fn write_export(dir: &Path, theme: &Theme) -> Result<PathBuf, ThemingError> {
    let json = export_theme(theme)?;
    let path = dir.join(export_file_name(theme));
    fs::create_dir_all(dir).await.map_err(|e| {
        let err = CoreError::Filesystem {
            message: "Failed to create export directory".to_string(),
            path: dir.to_path_buf(),
            source: e,
        };
        ThemingError::persistence("export", &err)
    })?;
    fs::write(&path, json).await.map_err(|e| {
        let err = CoreError::Filesystem {
            message: "Failed to write theme export".to_string(),
            path: path.clone(),
            source: e,
        };
        ThemingError::persistence("export", &err)
    })?;
    info!(theme_id = %theme.id, path = %path.display(), "Theme exported");
    Ok(path)
}

pub async fn read_import(path: &Path) -> Result<PartialThemeTokens, ThemingError> {
    let json = fs::read_to_string(path).await.map_err(|e| {
        let err = CoreError::Filesystem {
            message: "Failed to read theme document".to_string(),
            path: path.to_path_buf(),
            source: e,
        };
        ThemingError::persistence("import", &err)
    })?;
    import_theme(&json)
}
