//! # Taskboard Core Library (`taskboard-core`)
//!
//! Foundational infrastructure shared by the Taskboard crates:
//!
//! - **Error Handling**: [`CoreError`] and the more specific [`ConfigError`]
//!   and [`LoggingError`].
//! - **Configuration**: TOML-based [`CoreConfig`] loading with defaults and
//!   validation through [`ConfigLoader`].
//! - **Logging**: `tracing` subscriber setup for console and rolling files.
//! - **Utilities**: filesystem helpers and application directory resolution.
//!
//! ```rust,ignore
//! use taskboard_core::config::ConfigLoader;
//! use taskboard_core::logging::init_logging;
//! use taskboard_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!     tracing::info!("Taskboard core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, ThemingSettings};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
