//! Configuration Management for Taskboard Core.
//!
//! - [`types`]: the configuration schema ([`CoreConfig`], [`LoggingConfig`],
//!   [`ThemingSettings`]).
//! - [`defaults`]: default values used by serde for missing fields.
//! - [`loader`]: [`ConfigLoader`], which finds, parses and validates `config.toml`.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, ThemingSettings};
