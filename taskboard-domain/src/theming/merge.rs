//! Deep-merge of sparse token edits over complete theme records.
//!
//! All functions here are pure: they take the current record (or the
//! structural defaults) plus a [`PartialThemeTokens`] and produce a new,
//! complete [`Theme`]. Persistence and event publication live in the store.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::errors::ThemingError;
use super::themes;
use super::tokens::{PartialTokenMap, TokenKey, TokenPath};
use super::types::{PartialThemeTokens, PartialTypography, Theme, ThemeId, Typography};

/// Name given to drafts created without one.
pub const UNTITLED_THEME_NAME: &str = "Untitled Theme";

fn check_values<K: TokenKey>(section: &str, map: &PartialTokenMap<K>) -> Result<(), ThemingError> {
    match map.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((key, _)) => Err(ThemingError::malformed(format!("{}.{} must not be blank", section, key))),
        None => Ok(()),
    }
}

/// Rejects blank token values and a blank name.
pub fn validate_patch(patch: &PartialThemeTokens) -> Result<(), ThemingError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ThemingError::malformed("name must not be blank"));
        }
    }
    if let Some(family) = &patch.typography.font_family {
        if family.trim().is_empty() {
            return Err(ThemingError::malformed("typography.fontFamily must not be blank"));
        }
    }
    check_values("colors", &patch.colors)?;
    check_values("typography.fontSize", &patch.typography.font_size)?;
    check_values("typography.fontWeight", &patch.typography.font_weight)?;
    check_values("spacing", &patch.spacing)?;
    check_values("borderRadius", &patch.border_radius)?;
    check_values("shadows", &patch.shadows)?;
    Ok(())
}

fn merge_typography(base: &Typography, patch: &PartialTypography) -> Typography {
    Typography {
        font_family: patch
            .font_family
            .clone()
            .unwrap_or_else(|| base.font_family.clone()),
        font_size: base.font_size.merged(&patch.font_size),
        font_weight: base.font_weight.merged(&patch.font_weight),
    }
}

fn merge_tokens(base: &Theme, patch: &PartialThemeTokens) -> Theme {
    Theme {
        colors: base.colors.merged(&patch.colors),
        typography: merge_typography(&base.typography, &patch.typography),
        spacing: base.spacing.merged(&patch.spacing),
        border_radius: base.border_radius.merged(&patch.border_radius),
        shadows: base.shadows.merged(&patch.shadows),
        ..base.clone()
    }
}

/// Builds a fresh record from `draft` merged over the structural defaults.
///
/// The result is never the default and is always active.
pub fn new_theme(draft: &PartialThemeTokens, now: DateTime<Utc>) -> Result<Theme, ThemingError> {
    validate_patch(draft)?;
    let base = themes::structural_default_theme();
    let merged = merge_tokens(&base, draft);
    Ok(Theme {
        id: ThemeId::new(),
        name: draft
            .name
            .clone()
            .unwrap_or_else(|| UNTITLED_THEME_NAME.to_string()),
        description: draft.description.clone().unwrap_or_default(),
        is_default: false,
        is_active: true,
        created_by: draft.created_by.clone(),
        created_at: now,
        updated_at: now,
        version: 1,
        ..merged
    })
}

/// Produces the next revision of `current` with `patch` merged key-wise.
///
/// Identity, the default flag and creation provenance are preserved;
/// `updated_at` is refreshed and `version` incremented.
pub fn apply_patch(current: &Theme, patch: &PartialThemeTokens, now: DateTime<Utc>) -> Result<Theme, ThemingError> {
    validate_patch(patch)?;
    let mut next = merge_tokens(current, patch);
    if let Some(name) = &patch.name {
        next.name = name.clone();
    }
    if let Some(description) = &patch.description {
        next.description = description.clone();
    }
    if let Some(is_active) = patch.is_active {
        next.is_active = is_active;
    }
    next.updated_at = now;
    next.version = current.version.saturating_add(1);
    debug!(theme_id = %current.id, version = next.version, "Merged theme patch");
    Ok(next)
}

/// A patch that, merged over anything, reproduces `theme`'s name, description and tokens.
pub fn theme_to_patch(theme: &Theme) -> PartialThemeTokens {
    PartialThemeTokens {
        name: Some(theme.name.clone()),
        description: Some(theme.description.clone()),
        colors: theme.colors.to_partial(),
        typography: PartialTypography {
            font_family: Some(theme.typography.font_family.clone()),
            font_size: theme.typography.font_size.to_partial(),
            font_weight: theme.typography.font_weight.to_partial(),
        },
        spacing: theme.spacing.to_partial(),
        border_radius: theme.border_radius.to_partial(),
        shadows: theme.shadows.to_partial(),
        is_active: None,
        created_by: None,
    }
}

/// Current value of the token at `path`.
pub fn token_value<'a>(theme: &'a Theme, path: TokenPath) -> &'a str {
    match path {
        TokenPath::Color(k) => theme.colors.get(k),
        TokenPath::FontFamily => theme.typography.font_family.as_str(),
        TokenPath::FontSize(k) => theme.typography.font_size.get(k),
        TokenPath::FontWeight(k) => theme.typography.font_weight.get(k),
        TokenPath::Spacing(k) => theme.spacing.get(k),
        TokenPath::BorderRadius(k) => theme.border_radius.get(k),
        TokenPath::Shadow(k) => theme.shadows.get(k),
    }
}

/// Replaces a single token value in place.
pub fn set_token(theme: &mut Theme, path: TokenPath, value: &str) {
    match path {
        TokenPath::Color(k) => theme.colors.set(k, value),
        TokenPath::FontFamily => theme.typography.font_family = value.to_string(),
        TokenPath::FontSize(k) => theme.typography.font_size.set(k, value),
        TokenPath::FontWeight(k) => theme.typography.font_weight.set(k, value),
        TokenPath::Spacing(k) => theme.spacing.set(k, value),
        TokenPath::BorderRadius(k) => theme.border_radius.set(k, value),
        TokenPath::Shadow(k) => theme.shadows.set(k, value),
    }
}

/// Restores the single-default invariant on a loaded collection.
///
/// Zero defaults promote the first record; several defaults keep only the
/// first. Returns `true` when any flag changed.
pub fn repair_default_flags(themes: &mut [Theme]) -> bool {
    let mut changed = false;
    match themes.iter().position(|t| t.is_default) {
        Some(first) => {
            for theme in themes.iter_mut().skip(first + 1).filter(|t| t.is_default) {
                theme.is_default = false;
                changed = true;
            }
        }
        None => {
            if let Some(first) = themes.first_mut() {
                first.is_default = true;
                changed = true;
            }
        }
    }
    changed
}
