//! User preferences persisted under the `appSettings` key.
//!
//! Settings are loaded once, merged field by field over [`Settings::default`],
//! and written back after every change.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::total::parse_amount;

/// Colour theme chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Amoled,
    /// Follow the host preference
    System,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Amoled, Theme::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Amoled => "amoled",
            Theme::System => "system",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The concrete appearance to render with.
    pub fn resolve(&self, system_prefers_dark: bool) -> Appearance {
        match self {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::Amoled => Appearance::Amoled,
            Theme::System if system_prefers_dark => Appearance::Dark,
            Theme::System => Appearance::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    Amoled,
}

impl Appearance {
    pub fn is_dark(&self) -> bool {
        matches!(self, Appearance::Dark | Appearance::Amoled)
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::Amoled => "amoled",
        };
        write!(f, "{}", name)
    }
}

/// Colour roles derived from an accent colour for one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentPalette {
    pub accent: &'static str,
    pub hover: &'static str,
    pub text: &'static str,
    pub on_accent: &'static str,
}

const ON_LIGHT: &str = "#ffffff";
const ON_DARK: &str = "#0f172a";

/// One of the fixed accent colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Fuchsia,
    Rose,
    Emerald,
}

impl AccentColor {
    pub const ALL: [AccentColor; 8] = [
        AccentColor::Cyan,
        AccentColor::Sky,
        AccentColor::Blue,
        AccentColor::Indigo,
        AccentColor::Violet,
        AccentColor::Fuchsia,
        AccentColor::Rose,
        AccentColor::Emerald,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccentColor::Cyan => "cyan",
            AccentColor::Sky => "sky",
            AccentColor::Blue => "blue",
            AccentColor::Indigo => "indigo",
            AccentColor::Violet => "violet",
            AccentColor::Fuchsia => "fuchsia",
            AccentColor::Rose => "rose",
            AccentColor::Emerald => "emerald",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccentColor::Cyan => "Cyan",
            AccentColor::Sky => "Sky",
            AccentColor::Blue => "Blue",
            AccentColor::Indigo => "Indigo",
            AccentColor::Violet => "Violet",
            AccentColor::Fuchsia => "Fuchsia",
            AccentColor::Rose => "Rose",
            AccentColor::Emerald => "Emerald",
        }
    }

    /// Colour shown on the picker swatch.
    pub fn swatch(&self) -> &'static str {
        self.palette(Appearance::Dark).accent
    }

    pub fn palette(&self, appearance: Appearance) -> AccentPalette {
        // (light accent, light hover, dark accent, dark hover)
        let (light, light_hover, dark, dark_hover) = match self {
            AccentColor::Cyan => ("#0891b2", "#06b6d4", "#22d3ee", "#67e8f9"),
            AccentColor::Sky => ("#0284c7", "#0ea5e9", "#38bdf8", "#7dd3fc"),
            AccentColor::Blue => ("#2563eb", "#3b82f6", "#60a5fa", "#93c5fd"),
            AccentColor::Indigo => ("#4f46e5", "#6366f1", "#818cf8", "#a5b4fc"),
            AccentColor::Violet => ("#7c3aed", "#8b5cf6", "#a78bfa", "#c4b5fd"),
            AccentColor::Fuchsia => ("#c026d3", "#d946ef", "#e879f9", "#f0abfc"),
            AccentColor::Rose => ("#e11d48", "#f43f5e", "#f472b6", "#fb7185"),
            AccentColor::Emerald => ("#059669", "#10b981", "#34d399", "#6ee7b7"),
        };

        if appearance.is_dark() {
            AccentPalette {
                accent: dark,
                hover: dark_hover,
                text: dark,
                on_accent: ON_DARK,
            }
        } else {
            AccentPalette {
                accent: light,
                hover: light_hover,
                text: light,
                on_accent: ON_LIGHT,
            }
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences.
///
/// Missing fields take their value from [`Settings::default`]; an unknown
/// theme or accent name falls back to that field's default instead of
/// rejecting the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(deserialize_with = "or_default")]
    pub theme: Theme,
    /// Value of one meal voucher; 0 disables voucher tracking
    pub meal_voucher_value: f64,
    #[serde(deserialize_with = "or_default")]
    pub accent_color: AccentColor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            meal_voucher_value: 8.0,
            accent_color: AccentColor::Cyan,
        }
    }
}

impl Settings {
    /// Interpret text typed into the voucher value field.
    ///
    /// Blank input means 0 (tracking disabled). Returns `None` for anything
    /// that is not a non-negative number, in which case the value is left alone.
    pub fn parse_voucher_input(text: &str) -> Option<f64> {
        if text.trim().is_empty() {
            return Some(0.0);
        }
        parse_amount(text).filter(|value| *value >= 0.0)
    }

    pub fn vouchers_enabled(&self) -> bool {
        self.meal_voucher_value > 0.0
    }
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
