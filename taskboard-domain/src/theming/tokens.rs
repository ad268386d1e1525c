//! Design token key sets and token maps.
//!
//! Every token family (colors, font sizes, font weights, spacing, border
//! radius, shadows) has a closed key set modelled as a Rust enum. A
//! [`TokenMap`] always holds a value for every key of its family; a
//! [`PartialTokenMap`] holds any subset and is what callers use to describe
//! edits.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A member of a closed token key set.
pub trait TokenKey:
    Copy + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Every key of the family, in declaration order.
    const ALL: &'static [Self];
    /// Prefix of the style variables this family projects to.
    const NAMESPACE: &'static str;

    /// Wire name of the key, as used in JSON documents and variable names.
    fn as_str(self) -> &'static str;
}

/// Returned when a key is not a member of the expected family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTokenKey {
    pub namespace: &'static str,
    pub key: String,
}

impl fmt::Display for UnknownTokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} token key '{}'", self.namespace, self.key)
    }
}

impl std::error::Error for UnknownTokenKey {}

macro_rules! token_keys {
    (
        $(#[$meta:meta])*
        pub enum $name:ident in $namespace:literal {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl TokenKey for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];
            const NAMESPACE: &'static str = $namespace;

            fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownTokenKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(UnknownTokenKey {
                        namespace: $namespace,
                        key: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

token_keys! {
    /// Semantic color roles of the board UI.
    pub enum ColorRole in "color" {
        Primary => "primary",
        PrimaryHover => "primaryHover",
        Secondary => "secondary",
        SecondaryHover => "secondaryHover",
        Accent => "accent",
        Background => "background",
        Surface => "surface",
        SurfaceHover => "surfaceHover",
        Text => "text",
        TextSecondary => "textSecondary",
        TextMuted => "textMuted",
        Border => "border",
        BorderLight => "borderLight",
        Success => "success",
        Warning => "warning",
        Error => "error",
        Info => "info",
        HeaderBackground => "headerBackground",
        HeaderText => "headerText",
        SidebarBackground => "sidebarBackground",
        SidebarText => "sidebarText",
        SidebarHover => "sidebarHover",
        SidebarActive => "sidebarActive",
        BoardBackground => "boardBackground",
        ColumnBackground => "columnBackground",
        ColumnHeader => "columnHeader",
        ColumnBorder => "columnBorder",
        CardBackground => "cardBackground",
        CardBorder => "cardBorder",
        CardHover => "cardHover",
        CardText => "cardText",
        ButtonPrimary => "buttonPrimary",
        ButtonPrimaryText => "buttonPrimaryText",
        ButtonSecondary => "buttonSecondary",
        ButtonSecondaryText => "buttonSecondaryText",
        ButtonDanger => "buttonDanger",
        ButtonDangerText => "buttonDangerText",
        InputBackground => "inputBackground",
        InputBorder => "inputBorder",
        InputFocus => "inputFocus",
        InputText => "inputText",
        ModalBackground => "modalBackground",
        ModalOverlay => "modalOverlay",
    }
}

token_keys! {
    pub enum FontSizeScale in "typography-fontSize" {
        Xs => "xs",
        Sm => "sm",
        Base => "base",
        Lg => "lg",
        Xl => "xl",
        Xl2 => "2xl",
        Xl3 => "3xl",
    }
}

token_keys! {
    pub enum FontWeightName in "typography-fontWeight" {
        Normal => "normal",
        Medium => "medium",
        Semibold => "semibold",
        Bold => "bold",
    }
}

token_keys! {
    pub enum SpacingScale in "spacing" {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xl2 => "2xl",
    }
}

token_keys! {
    pub enum RadiusScale in "border-radius" {
        None => "none",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Full => "full",
    }
}

token_keys! {
    pub enum ShadowScale in "shadow" {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
    }
}

/// A sparse set of token values, used for drafts, patches and imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "K: TokenKey", deserialize = "K: TokenKey"))]
pub struct PartialTokenMap<K: TokenKey>(BTreeMap<K, String>);

impl<K: TokenKey> Default for PartialTokenMap<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: TokenKey> PartialTokenMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: K, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: K, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: K) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<K: TokenKey> FromIterator<(K, String)> for PartialTokenMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A token map holding a value for every key of its family.
///
/// Completeness is enforced at construction and on deserialization; the only
/// way to change values afterwards is key-wise replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<K, String>",
    into = "BTreeMap<K, String>",
    bound(serialize = "K: TokenKey", deserialize = "K: TokenKey")
)]
pub struct TokenMap<K: TokenKey> {
    values: BTreeMap<K, String>,
}

/// Returned when a token map is missing keys of its family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteTokenMap {
    pub namespace: &'static str,
    pub missing: Vec<&'static str>,
}

impl fmt::Display for IncompleteTokenMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} token map is missing keys: {}", self.namespace, self.missing.join(", "))
    }
}

impl std::error::Error for IncompleteTokenMap {}

impl<K: TokenKey> TokenMap<K> {
    /// Builds a complete map by asking `value_for` for every key.
    pub fn from_fn<F, V>(mut value_for: F) -> Self
    where
        F: FnMut(K) -> V,
        V: Into<String>,
    {
        let values = K::ALL.iter().map(|k| (*k, value_for(*k).into())).collect();
        Self { values }
    }

    pub fn get(&self, key: K) -> &str {
        self.values.get(&key).map_or("", String::as_str)
    }

    /// Replaces the value of one key.
    pub fn set(&mut self, key: K, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Key-wise override: keys present in `patch` replace ours, all others survive.
    pub fn merged(&self, patch: &PartialTokenMap<K>) -> Self {
        let mut merged = self.clone();
        for (key, value) in patch.iter() {
            merged.set(key, value);
        }
        merged
    }

    pub fn to_partial(&self) -> PartialTokenMap<K> {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

impl<K: TokenKey> TryFrom<BTreeMap<K, String>> for TokenMap<K> {
    type Error = IncompleteTokenMap;

    fn try_from(values: BTreeMap<K, String>) -> Result<Self, Self::Error> {
        let missing: Vec<&'static str> = K::ALL
            .iter()
            .filter(|k| !values.contains_key(k))
            .map(|k| k.as_str())
            .collect();
        if missing.is_empty() {
            Ok(Self { values })
        } else {
            Err(IncompleteTokenMap {
                namespace: K::NAMESPACE,
                missing,
            })
        }
    }
}

impl<K: TokenKey> From<TokenMap<K>> for BTreeMap<K, String> {
    fn from(map: TokenMap<K>) -> Self {
        map.values
    }
}

/// Address of a single token inside a theme.
///
/// Parses from dotted document paths such as `colors.cardBackground`,
/// `typography.fontFamily`, `typography.fontSize.lg` or `borderRadius.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPath {
    Color(ColorRole),
    FontFamily,
    FontSize(FontSizeScale),
    FontWeight(FontWeightName),
    Spacing(SpacingScale),
    BorderRadius(RadiusScale),
    Shadow(ShadowScale),
}

/// Style variable carrying `typography.fontFamily`.
pub const FONT_FAMILY_VARIABLE: &str = "--typography-fontFamily";

/// Name of the style variable a key projects to: `--<namespace>-<key>`.
pub fn variable_name<K: TokenKey>(key: K) -> String {
    format!("--{}-{}", K::NAMESPACE, key.as_str())
}

impl TokenPath {
    pub fn variable_name(&self) -> String {
        match *self {
            TokenPath::Color(k) => variable_name(k),
            TokenPath::FontFamily => FONT_FAMILY_VARIABLE.to_string(),
            TokenPath::FontSize(k) => variable_name(k),
            TokenPath::FontWeight(k) => variable_name(k),
            TokenPath::Spacing(k) => variable_name(k),
            TokenPath::BorderRadius(k) => variable_name(k),
            TokenPath::Shadow(k) => variable_name(k),
        }
    }
}

impl FromStr for TokenPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn key<K: TokenKey + FromStr<Err = UnknownTokenKey>>(raw: Option<&str>) -> Result<K, String> {
            raw.ok_or_else(|| format!("missing {} key", K::NAMESPACE))?
                .parse()
                .map_err(|e: UnknownTokenKey| e.to_string())
        }

        let mut parts = s.splitn(3, '.');
        let path = match (parts.next(), parts.next(), parts.next()) {
            (Some("colors"), k, None) => TokenPath::Color(key(k)?),
            (Some("typography"), Some("fontFamily"), None) => TokenPath::FontFamily,
            (Some("typography"), Some("fontSize"), k) => TokenPath::FontSize(key(k)?),
            (Some("typography"), Some("fontWeight"), k) => TokenPath::FontWeight(key(k)?),
            (Some("spacing"), k, None) => TokenPath::Spacing(key(k)?),
            (Some("borderRadius"), k, None) => TokenPath::BorderRadius(key(k)?),
            (Some("shadows"), k, None) => TokenPath::Shadow(key(k)?),
            _ => return Err(format!("unknown token path '{}'", s)),
        };
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn color_roles_cover_the_board_palette() {
        assert_eq!(ColorRole::ALL.len(), 43);
        assert_eq!(ColorRole::ButtonDangerText.as_str(), "buttonDangerText");
        assert_eq!("cardBackground".parse::<ColorRole>().unwrap(), ColorRole::CardBackground);
    }

    #[test]
    fn unknown_keys_are_rejected_on_deserialize() {
        let result: Result<PartialTokenMap<ColorRole>, _> = serde_json::from_str(r##"{"primry": "#fff"}"##);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unknown color token key 'primry'"), "{}", message);
    }

    #[test]
    fn incomplete_token_map_fails_to_deserialize() {
        let result: Result<TokenMap<ShadowScale>, _> = serde_json::from_str(r#"{"sm": "none", "md": "none"}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("lg"), "{}", message);
        assert!(message.contains("xl"), "{}", message);
    }

    #[test]
    fn merged_overrides_only_patched_keys() {
        let base = TokenMap::<SpacingScale>::from_fn(|_| "4px");
        let merged = base.merged(&PartialTokenMap::new().with(SpacingScale::Md, "12px"));

        assert_eq!(merged.get(SpacingScale::Md), "12px");
        for key in SpacingScale::ALL.iter().filter(|k| **k != SpacingScale::Md) {
            assert_eq!(merged.get(*key), "4px");
        }
    }

    #[test]
    fn token_map_serializes_with_wire_names() {
        let map = TokenMap::<FontSizeScale>::from_fn(|k| format!("{}-size", k));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["2xl"], "2xl-size");
        assert_eq!(json.as_object().unwrap().len(), FontSizeScale::ALL.len());
    }

    #[rstest]
    #[case("colors.primary", TokenPath::Color(ColorRole::Primary), "--color-primary")]
    #[case("typography.fontFamily", TokenPath::FontFamily, "--typography-fontFamily")]
    #[case("typography.fontSize.2xl", TokenPath::FontSize(FontSizeScale::Xl2), "--typography-fontSize-2xl")]
    #[case("typography.fontWeight.bold", TokenPath::FontWeight(FontWeightName::Bold), "--typography-fontWeight-bold")]
    #[case("spacing.md", TokenPath::Spacing(SpacingScale::Md), "--spacing-md")]
    #[case("borderRadius.full", TokenPath::BorderRadius(RadiusScale::Full), "--border-radius-full")]
    #[case("shadows.lg", TokenPath::Shadow(ShadowScale::Lg), "--shadow-lg")]
    fn token_paths_parse_and_name_variables(#[case] raw: &str, #[case] path: TokenPath, #[case] variable: &str) {
        assert_eq!(raw.parse::<TokenPath>().unwrap(), path);
        assert_eq!(path.variable_name(), variable);
    }

    #[rstest]
    #[case("colors")]
    #[case("colors.nope")]
    #[case("typography.lineHeight")]
    #[case("margins.md")]
    fn invalid_token_paths_are_rejected(#[case] raw: &str) {
        assert!(raw.parse::<TokenPath>().is_err());
    }
}
