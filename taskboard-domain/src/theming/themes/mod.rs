//! Built-in themes and the structural defaults they share.

pub mod default_dark;
pub mod default_light;

use chrono::{DateTime, Utc};

use super::tokens::{ColorRole, FontSizeScale, FontWeightName, RadiusScale, ShadowScale, SpacingScale, TokenMap};
use super::types::{Theme, ThemeId, Typography};

pub const DEFAULT_FONT_FAMILY: &str = "Inter, system-ui, -apple-system, sans-serif";

pub fn font_size(scale: FontSizeScale) -> &'static str {
    match scale {
        FontSizeScale::Xs => "0.75rem",
        FontSizeScale::Sm => "0.875rem",
        FontSizeScale::Base => "1rem",
        FontSizeScale::Lg => "1.125rem",
        FontSizeScale::Xl => "1.25rem",
        FontSizeScale::Xl2 => "1.5rem",
        FontSizeScale::Xl3 => "1.875rem",
    }
}

pub fn font_weight(weight: FontWeightName) -> &'static str {
    match weight {
        FontWeightName::Normal => "400",
        FontWeightName::Medium => "500",
        FontWeightName::Semibold => "600",
        FontWeightName::Bold => "700",
    }
}

pub fn spacing(scale: SpacingScale) -> &'static str {
    match scale {
        SpacingScale::Xs => "0.25rem",
        SpacingScale::Sm => "0.5rem",
        SpacingScale::Md => "1rem",
        SpacingScale::Lg => "1.5rem",
        SpacingScale::Xl => "2rem",
        SpacingScale::Xl2 => "3rem",
    }
}

pub fn border_radius(scale: RadiusScale) -> &'static str {
    match scale {
        RadiusScale::None => "0",
        RadiusScale::Sm => "0.125rem",
        RadiusScale::Md => "0.375rem",
        RadiusScale::Lg => "0.5rem",
        RadiusScale::Xl => "0.75rem",
        RadiusScale::Full => "9999px",
    }
}

pub fn shadow(scale: ShadowScale) -> &'static str {
    match scale {
        ShadowScale::Sm => "0 1px 2px 0 rgba(0, 0, 0, 0.05)",
        ShadowScale::Md => "0 4px 6px -1px rgba(0, 0, 0, 0.1)",
        ShadowScale::Lg => "0 10px 15px -3px rgba(0, 0, 0, 0.1)",
        ShadowScale::Xl => "0 20px 25px -5px rgba(0, 0, 0, 0.1)",
    }
}

fn built_in(
    name: &str,
    description: &str,
    palette: fn(ColorRole) -> &'static str,
    is_default: bool,
    now: DateTime<Utc>,
) -> Theme {
    Theme {
        id: ThemeId::new(),
        name: name.to_string(),
        description: description.to_string(),
        colors: TokenMap::from_fn(palette),
        typography: Typography {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: TokenMap::from_fn(font_size),
            font_weight: TokenMap::from_fn(font_weight),
        },
        spacing: TokenMap::from_fn(spacing),
        border_radius: TokenMap::from_fn(border_radius),
        shadows: TokenMap::from_fn(shadow),
        is_default,
        is_active: true,
        created_by: None,
        created_at: now,
        updated_at: now,
        version: 1,
    }
}

/// The complete theme every draft is merged over, and the last-resort
/// theme applied when nothing can be loaded.
pub fn structural_default_theme() -> Theme {
    built_in(
        default_light::NAME,
        default_light::DESCRIPTION,
        default_light::color,
        true,
        Utc::now(),
    )
}

/// Records written to an empty store: the light theme (default) and the dark theme.
pub fn seed_themes(now: DateTime<Utc>) -> Vec<Theme> {
    vec![
        built_in(default_light::NAME, default_light::DESCRIPTION, default_light::color, true, now),
        built_in(default_dark::NAME, default_dark::DESCRIPTION, default_dark::color, false, now),
    ]
}
