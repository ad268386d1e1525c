//! Application-specific directory resolution.
//!
//! Thin wrappers over `directories-next` that resolve where Taskboard keeps
//! its configuration (`config.toml`), its durable data (theme collection) and
//! its state (log files). All functions return
//! [`CoreError::Config(ConfigError::DirectoryUnavailable)`] when the platform
//! cannot provide the directory (e.g. no HOME).

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Taskboard";
const APPLICATION: &str = "Taskboard";

/// Environment variable that overrides the location of `config.toml`.
pub const CONFIG_PATH_ENV_VAR: &str = "TASKBOARD_CONFIG_PATH";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the application-specific configuration directory,
/// e.g. `~/.config/Taskboard` on Linux.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the application-specific data directory,
/// e.g. `~/.local/share/Taskboard` on Linux.
pub fn get_app_data_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Data").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Returns the application-specific state directory.
///
/// On Linux this honours `$XDG_STATE_HOME` and falls back to
/// `~/.local/state/Taskboard`; elsewhere the local data directory is used.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                let base = match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                };
                base.join(APPLICATION)
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().join(APPLICATION)
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App State".to_string(),
            })
        })
}

/// Returns the path of `config.toml`, honouring [`CONFIG_PATH_ENV_VAR`].
pub fn get_config_file_path() -> Result<PathBuf, CoreError> {
    match std::env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => get_app_config_dir().map(|dir| dir.join("config.toml")),
    }
}
