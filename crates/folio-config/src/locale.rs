//! Locale declarations.

use serde::{Deserialize, Serialize};

/// Text direction of a locale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// A language/region tag partitioning content and navigation.
///
/// Locales keep the order in which they were declared in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Locale tag (e.g., "en", "zh-Hans").
    pub tag: String,
    /// Human-readable label for locale switchers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether this is the default locale.
    #[serde(default)]
    pub default: bool,
    /// Text direction.
    #[serde(default)]
    pub direction: Direction,
}

impl Locale {
    /// Create a locale with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: None,
            default: false,
            direction: Direction::Ltr,
        }
    }

    /// Create the default locale with the given tag.
    #[must_use]
    pub fn default_locale(tag: impl Into<String>) -> Self {
        Self {
            default: true,
            ..Self::new(tag)
        }
    }

    /// Display label, falling back to the tag.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.tag)
    }
}
