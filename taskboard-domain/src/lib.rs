//! Domain layer for Taskboard.
//!
//! Hosts the theming subsystem: a durable repository of named theme records
//! with a single default, a live style engine that previews drafts and rolls
//! them back, a JSON codec for import/export, and the controller that owns
//! the currently applied theme.

// Re-export core module
pub use taskboard_core as core;

pub mod persistence;
pub mod ports;
pub mod theming;

pub use persistence::{FileKeyValueStore, InMemoryKeyValueStore};
pub use ports::KeyValueStore;
pub use theming::{
    EditingSession, InMemoryStyleTarget, LiveStyleEngine, PartialThemeTokens, StyleTarget, Theme, ThemeChangedEvent,
    ThemeController, ThemeId, ThemeStore, ThemeStoreEvent, ThemingError,
};
