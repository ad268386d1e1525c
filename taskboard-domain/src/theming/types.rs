//! Core data structures of the theming subsystem.
//!
//! [`Theme`] is the persisted record: every token map is complete. Edits,
//! drafts and imports are described with [`PartialThemeTokens`], whose maps
//! may be sparse and are deep-merged over a complete record by
//! [`super::merge`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tokens::{
    ColorRole, FontSizeScale, FontWeightName, PartialTokenMap, RadiusScale, ShadowScale, SpacingScale, TokenMap,
};

/// Unique identifier of a theme, assigned at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(Uuid);

impl ThemeId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ThemeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ThemeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Font family plus the complete font size and weight scales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: TokenMap<FontSizeScale>,
    pub font_weight: TokenMap<FontWeightName>,
}

/// Sparse typography edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialTypography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub font_size: PartialTokenMap<FontSizeScale>,
    pub font_weight: PartialTokenMap<FontWeightName>,
}

impl PartialTypography {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none() && self.font_size.is_empty() && self.font_weight.is_empty()
    }
}

fn initial_version() -> u64 {
    1
}

/// A persisted theme record.
///
/// Records are replaced wholesale on every mutation; readers always receive
/// clones of committed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub description: String,
    pub colors: TokenMap<ColorRole>,
    pub typography: Typography,
    pub spacing: TokenMap<SpacingScale>,
    #[serde(rename = "borderRadius")]
    pub border_radius: TokenMap<RadiusScale>,
    pub shadows: TokenMap<ShadowScale>,
    /// Exactly one persisted theme carries this flag.
    pub is_default: bool,
    /// Soft visibility flag, independent of `is_default`.
    pub is_active: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented on every update; used for optimistic concurrency checks.
    #[serde(default = "initial_version")]
    pub version: u64,
}

impl Theme {
    /// Token-wise equality, ignoring identity, flags and provenance.
    pub fn same_tokens(&self, other: &Theme) -> bool {
        self.colors == other.colors
            && self.typography == other.typography
            && self.spacing == other.spacing
            && self.border_radius == other.border_radius
            && self.shadows == other.shadows
    }
}

/// Caller-supplied tokens and metadata for `create` and `update`.
///
/// Every map is sparse; omitted keys keep the value of the record (or of the
/// structural defaults when creating).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialThemeTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: PartialTokenMap<ColorRole>,
    pub typography: PartialTypography,
    pub spacing: PartialTokenMap<SpacingScale>,
    pub border_radius: PartialTokenMap<RadiusScale>,
    pub shadows: PartialTokenMap<ShadowScale>,
    /// Ignored by `create`, which always produces an active record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl PartialThemeTokens {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, role: ColorRole, value: impl Into<String>) -> Self {
        self.colors.insert(role, value);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.typography.font_family = Some(family.into());
        self
    }

    pub fn with_spacing(mut self, scale: SpacingScale, value: impl Into<String>) -> Self {
        self.spacing.insert(scale, value);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn created_by(mut self, author: impl Into<String>) -> Self {
        self.created_by = Some(author.into());
        self
    }
}
