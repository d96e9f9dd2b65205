//! Theme, navbar and footer configuration.
//!
//! These sections are descriptive: the engine validates them and passes
//! them through to the assembled site tree for the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Light/dark pair for a single theme token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeToken {
    pub light: String,
    pub dark: String,
}

/// External stylesheet reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub href: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// Theme configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Named token pairs (e.g., `code = { light = "github", dark = "dracula" }`).
    pub tokens: BTreeMap<String, ThemeToken>,
    /// External stylesheets loaded by every page.
    pub stylesheets: Vec<Stylesheet>,
    /// Custom CSS files bundled by the renderer.
    pub custom_css: Vec<String>,
    /// Social card image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Which side of the navbar an item sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemPosition {
    #[default]
    Left,
    Right,
}

/// Navbar item type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavbarItemKind {
    /// Plain link with a label and a target.
    #[default]
    Link,
    /// Link to the first document of the docs sidebar.
    DocSidebar,
    /// Locale switcher.
    LocaleDropdown,
}

/// Label + target link used by the navbar and footer.
///
/// `to` is an internal route (checked for broken links), `href` an
/// external URL (never checked).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Navbar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarItem {
    #[serde(rename = "type")]
    pub kind: NavbarItemKind,
    #[serde(flatten)]
    pub link: LinkItem,
    pub position: ItemPosition,
}

/// Navbar configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<NavbarItem>,
}

/// Footer color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// Titled group of footer links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    pub title: String,
    pub items: Vec<LinkItem>,
}

/// Footer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub columns: Vec<FooterColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl NavbarConfig {
    /// Internal link targets (`to`) declared by navbar items.
    pub fn internal_targets(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.link.to.as_deref())
    }
}

impl FooterConfig {
    /// Internal link targets (`to`) declared by footer columns.
    pub fn internal_targets(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .flat_map(|c| &c.items)
            .filter_map(|item| item.to.as_deref())
    }
}
