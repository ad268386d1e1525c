//! A filesystem-backed implementation of [`KeyValueStore`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use taskboard_core::utils::paths;
use taskboard_core::{CoreError, ThemingSettings};
use tokio::fs;
use tracing::debug;

use crate::ports::KeyValueStore;

/// Stores every key as `<root>/<key>.json`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `settings.data_dir`, or the application data directory when unset.
    pub fn from_settings(settings: &ThemingSettings) -> Result<Self, CoreError> {
        let root = match &settings.data_dir {
            Some(dir) => dir.clone(),
            None => paths::get_app_data_dir()?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid {
            return Err(CoreError::InvalidInput(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value for key '{}'", key);
                Ok(None)
            }
            Err(e) => Err(CoreError::Filesystem {
                message: "Failed to read stored value".to_string(),
                path,
                source: e,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).await.map_err(|e| CoreError::Filesystem {
            message: "Failed to create storage directory".to_string(),
            path: self.root.clone(),
            source: e,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await.map_err(|e| CoreError::Filesystem {
            message: "Failed to write temporary file".to_string(),
            path: tmp_path.clone(),
            source: e,
        })?;

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(CoreError::Filesystem {
                message: "Failed to replace stored value".to_string(),
                path,
                source: e,
            });
        }
        Ok(())
    }
}
