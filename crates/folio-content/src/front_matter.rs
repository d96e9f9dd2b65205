//! Front-matter parsing.
//!
//! Front-matter is a YAML block fenced by `---` lines at the very start of
//! a document. Documents without one get [`FrontMatter::default`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Document options declared in front-matter.
///
/// Keys the engine does not interpret are preserved in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Title override (wins over the first H1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permalink override: absolute (`/x`) from the route base, otherwise
    /// replaces the last path segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Sidebar label (defaults to the title).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    /// Explicit ordering hint within the parent folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<f64>,
    /// Collapse override for the category this document is the index of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_collapsed: Option<bool>,
    /// Edit URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_edit_url: Option<String>,
    /// Feed inclusion for blog posts (defaults to included).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<bool>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Blog post authors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Publication date (`YYYY-MM-DD`, optionally followed by a time).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc_min_heading_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc_max_heading_level: Option<u8>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hide_table_of_contents: bool,
    /// Unrecognised keys.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A\x{FEFF}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("front-matter regex is valid")
    })
}

/// Split `content` into its raw YAML front-matter and markdown body.
///
/// Returns `Ok((None, content))` when the document has no front-matter.
///
/// # Errors
///
/// Returns a message when an opening `---` fence is never closed.
pub fn split_front_matter(content: &str) -> Result<(Option<&str>, &str), String> {
    if let Some(captures) = fence_regex().captures(content) {
        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body_start = captures.get(0).map_or(0, |m| m.end());
        return Ok((Some(yaml), &content[body_start..]));
    }

    let first_line = content.trim_start_matches('\u{feff}').lines().next();
    if first_line.is_some_and(|line| line.trim_end() == "---") {
        return Err("front-matter opened with '---' is never closed".to_owned());
    }
    Ok((None, content))
}

/// Parse front-matter YAML.
///
/// Empty input yields the default front-matter.
///
/// # Errors
///
/// Returns a message describing malformed YAML or a wrong value type.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, String> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| format!("Invalid front-matter: {e}"))
}

impl FrontMatter {
    /// Whether this document should be left out of blog feeds.
    #[must_use]
    pub fn excluded_from_feed(&self) -> bool {
        self.feed == Some(false)
    }
}
