//! The global style surface themes are projected onto.
//!
//! A [`StyleTarget`] is a flat map of named style variables plus a handful
//! of coarse page-level properties. The naming contract (which variable
//! carries which token) is defined once, by [`style_variables`].

use std::collections::BTreeMap;
use std::fmt;

use super::tokens::{
    variable_name, ColorRole, FontSizeScale, FontWeightName, RadiusScale, ShadowScale, SpacingScale, TokenKey,
    TokenMap, TokenPath, FONT_FAMILY_VARIABLE,
};
use super::types::Theme;

/// Page-level properties mirrored from a few tokens for immediate effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageProperty {
    Background,
    TextColor,
    FontFamily,
}

impl PageProperty {
    pub const ALL: [PageProperty; 3] = [PageProperty::Background, PageProperty::TextColor, PageProperty::FontFamily];

    pub fn css_name(self) -> &'static str {
        match self {
            PageProperty::Background => "background",
            PageProperty::TextColor => "color",
            PageProperty::FontFamily => "font-family",
        }
    }

    /// The page property a token is mirrored onto, if any.
    pub fn mirrored_from(path: TokenPath) -> Option<PageProperty> {
        match path {
            TokenPath::Color(ColorRole::Background) => Some(PageProperty::Background),
            TokenPath::Color(ColorRole::Text) => Some(PageProperty::TextColor),
            TokenPath::FontFamily => Some(PageProperty::FontFamily),
            _ => None,
        }
    }
}

impl fmt::Display for PageProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A mutable style surface.
///
/// Writes are synchronous and infallible.
pub trait StyleTarget: Send {
    fn set_variable(&mut self, name: &str, value: &str);
    fn variable(&self, name: &str) -> Option<String>;
    fn remove_variable(&mut self, name: &str);

    fn set_page_property(&mut self, property: PageProperty, value: &str);
    fn page_property(&self, property: PageProperty) -> Option<String>;
    fn remove_page_property(&mut self, property: PageProperty);
}

/// Process-local style surface that can render itself as a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStyleTarget {
    variables: BTreeMap<String, String>,
    page: BTreeMap<PageProperty, String>,
}

impl InMemoryStyleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Renders `:root { ... }` with every variable, followed by `body { ... }`
    /// with the page-level properties.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n\nbody {\n");
        for (property, value) in &self.page {
            css.push_str(&format!("  {}: {};\n", property.css_name(), value));
        }
        css.push_str("}\n");
        css
    }
}

impl StyleTarget for InMemoryStyleTarget {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn remove_variable(&mut self, name: &str) {
        self.variables.remove(name);
    }

    fn set_page_property(&mut self, property: PageProperty, value: &str) {
        self.page.insert(property, value.to_string());
    }

    fn page_property(&self, property: PageProperty) -> Option<String> {
        self.page.get(&property).cloned()
    }

    fn remove_page_property(&mut self, property: PageProperty) {
        self.page.remove(&property);
    }
}

fn push_map<K: TokenKey>(out: &mut Vec<(String, String)>, map: &TokenMap<K>) {
    out.extend(map.iter().map(|(k, v)| (variable_name(k), v.to_string())));
}

/// Every `(variable, value)` pair `theme` projects, in a stable order.
pub fn style_variables(theme: &Theme) -> Vec<(String, String)> {
    let mut out = Vec::new();
    push_map(&mut out, &theme.colors);
    out.push((FONT_FAMILY_VARIABLE.to_string(), theme.typography.font_family.clone()));
    push_map(&mut out, &theme.typography.font_size);
    push_map(&mut out, &theme.typography.font_weight);
    push_map(&mut out, &theme.spacing);
    push_map(&mut out, &theme.border_radius);
    push_map(&mut out, &theme.shadows);
    out
}

fn push_names<K: TokenKey>(out: &mut Vec<String>) {
    out.extend(K::ALL.iter().map(|k| variable_name(*k)));
}

/// Names of every variable a valid theme projects.
pub fn contract_variable_names() -> Vec<String> {
    let mut out = Vec::new();
    push_names::<ColorRole>(&mut out);
    out.push(FONT_FAMILY_VARIABLE.to_string());
    push_names::<FontSizeScale>(&mut out);
    push_names::<FontWeightName>(&mut out);
    push_names::<SpacingScale>(&mut out);
    push_names::<RadiusScale>(&mut out);
    push_names::<ShadowScale>(&mut out);
    out
}
