//! `_category_.yml` sidecar metadata.

use serde::{Deserialize, Serialize};

/// Sidebar options for a content folder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryMeta {
    /// Folder path relative to the content root (filled in by the loader).
    #[serde(skip_deserializing)]
    pub dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// `false` keeps the category permanently expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra sidebar entries pointing outside the folder's documents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<SidebarLink>,
}

/// Explicit sidebar link declared in a sidecar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidebarLink {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

/// Parse sidecar YAML. Empty content yields the default.
pub(crate) fn parse_category(content: &str, dir: &str) -> Result<CategoryMeta, String> {
    let trimmed = content.trim();
    let mut meta = if trimmed.is_empty() {
        CategoryMeta::default()
    } else {
        serde_yaml::from_str::<CategoryMeta>(trimmed).map_err(|e| format!("Invalid YAML: {e}"))?
    };
    meta.dir = dir.to_owned();
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_category() {
        let meta = parse_category(
            "label: Guides\nposition: 2\ncollapsed: false\ncollapsible: true\n",
            "guide",
        )
        .unwrap();
        assert_eq!(meta.dir, "guide");
        assert_eq!(meta.label.as_deref(), Some("Guides"));
        assert_eq!(meta.position, Some(2.0));
        assert_eq!(meta.collapsed, Some(false));
        assert_eq!(meta.collapsible, Some(true));
    }

    #[test]
    fn test_parse_category_links() {
        let meta = parse_category(
            "links:\n  - label: GitHub\n    href: https://github.com/example\n    position: 9\n",
            "",
        )
        .unwrap();
        assert_eq!(
            meta.links,
            vec![SidebarLink {
                label: "GitHub".to_owned(),
                href: "https://github.com/example".to_owned(),
                position: Some(9.0),
            }]
        );
    }

    #[test]
    fn test_parse_empty_category() {
        let meta = parse_category("", "api").unwrap();
        assert_eq!(meta.dir, "api");
        assert!(meta.label.is_none());
    }

    #[test]
    fn test_parse_invalid_category() {
        let err = parse_category("position: [", "api").unwrap_err();
        assert!(err.starts_with("Invalid YAML"));
    }
}
