//! General utilities for Taskboard Core.
//!
//! - [`fs`]: filesystem helpers that report failures as `CoreError`.
//! - [`paths`]: application-specific configuration, data and state directories.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
