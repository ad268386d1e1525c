// Theme management: records, durable store, live preview and the active theme controller.

pub mod codec;
pub mod controller;
pub mod engine;
pub mod errors;
pub mod events;
pub mod merge;
pub mod session;
pub mod store;
pub mod style;
pub mod themes;
pub mod tokens;
pub mod types;

#[cfg(test)]
mod controller_tests;
#[cfg(test)]
mod store_tests;

// Re-exports
pub use codec::{export_file_name, export_theme, import_theme, read_import, write_export, ThemeDocument};
pub use controller::ThemeController;
pub use engine::{LiveStyleEngine, StyleSnapshot};
pub use errors::ThemingError;
pub use events::{ThemeChangedEvent, ThemeStoreEvent};
pub use session::EditingSession;
pub use store::ThemeStore;
pub use style::{style_variables, InMemoryStyleTarget, PageProperty, StyleTarget};
pub use themes::structural_default_theme;
pub use tokens::{
    ColorRole, FontSizeScale, FontWeightName, PartialTokenMap, RadiusScale, ShadowScale, SpacingScale, TokenKey,
    TokenMap, TokenPath,
};
pub use types::{PartialThemeTokens, PartialTypography, Theme, ThemeId, Typography};
