//! Per-document table of contents.

use folio_config::TocConfig;
use folio_content::{Document, Node};
use serde::{Deserialize, Serialize};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
}

/// Table of contents for a document.
///
/// Uses the document's front-matter bounds when set, `defaults` otherwise.
/// Empty when the document sets `hide_table_of_contents`.
#[must_use]
pub fn table_of_contents(document: &Document, defaults: TocConfig) -> Vec<TocEntry> {
    if document.front_matter.hide_table_of_contents {
        return Vec::new();
    }
    headings(&document.tree, document.toc_bounds(defaults))
}

/// Top-level headings with `min <= level <= max`.
///
/// Headings nested in lists or block quotes are not part of the outline.
#[must_use]
pub fn headings(nodes: &[Node], bounds: TocConfig) -> Vec<TocEntry> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Heading {
                level, text, anchor, ..
            } if bounds.contains(*level) => Some(TocEntry {
                level: *level,
                title: text.clone(),
                anchor: anchor.clone(),
            }),
            _ => None,
        })
        .collect()
}
