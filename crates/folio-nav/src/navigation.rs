//! Navigation tree types.

use folio_content::DocumentId;
use serde::{Deserialize, Serialize};

/// Sidebar tree for one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Locale tag the tree belongs to.
    pub locale: String,
    pub items: Vec<NavNode>,
}

/// Sidebar item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavNode {
    /// Leaf pointing at one document.
    Doc {
        id: DocumentId,
        label: String,
        permalink: String,
    },
    /// Folder with ordered children.
    Category {
        label: String,
        /// Folder `index` document, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<CategoryLink>,
        collapsed: bool,
        collapsible: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<NavNode>,
    },
    /// Explicit link declared in a category sidecar.
    Link { label: String, href: String },
}

/// Document a category label links to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub id: DocumentId,
    pub permalink: String,
}

impl NavNode {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Doc { label, .. } | Self::Category { label, .. } | Self::Link { label, .. } => label,
        }
    }

    /// Document this item opens when clicked.
    #[must_use]
    pub fn document(&self) -> Option<&DocumentId> {
        match self {
            Self::Doc { id, .. } => Some(id),
            Self::Category { link, .. } => link.as_ref().map(|link| &link.id),
            Self::Link { .. } => None,
        }
    }

    fn permalink(&self) -> Option<&str> {
        match self {
            Self::Doc { permalink, .. } => Some(permalink),
            Self::Category { link, .. } => link.as_ref().map(|link| link.permalink.as_str()),
            Self::Link { .. } => None,
        }
    }

    fn items(&self) -> &[NavNode] {
        match self {
            Self::Category { items, .. } => items,
            Self::Doc { .. } | Self::Link { .. } => &[],
        }
    }
}

/// Ancestor category of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Link document permalink; `None` for categories without an index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// Neighbouring page in sidebar order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub label: String,
    pub permalink: String,
}

/// Previous and next pages of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

impl Navigation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Documents in sidebar order. A category's link document comes
    /// before its children.
    #[must_use]
    pub fn documents(&self) -> Vec<&DocumentId> {
        let mut pages = Vec::new();
        collect_pages(&self.items, &mut pages);
        pages.into_iter().filter_map(NavNode::document).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents().contains(&id)
    }

    /// Categories enclosing a document, outermost first.
    ///
    /// A category's own link document does not list that category.
    /// Unknown documents have no breadcrumbs.
    #[must_use]
    pub fn breadcrumbs(&self, id: &DocumentId) -> Vec<Breadcrumb> {
        let mut trail = Vec::new();
        if !find_trail(&self.items, id, &mut trail) {
            return Vec::new();
        }
        // The last element is the item itself.
        trail.pop();
        trail
            .into_iter()
            .map(|node| Breadcrumb {
                label: node.label().to_owned(),
                permalink: node.permalink().map(str::to_owned),
            })
            .collect()
    }

    /// Previous and next documents in sidebar order.
    #[must_use]
    pub fn pagination(&self, id: &DocumentId) -> Pagination {
        let mut pages = Vec::new();
        collect_pages(&self.items, &mut pages);

        let Some(idx) = pages.iter().position(|node| node.document() == Some(id)) else {
            return Pagination::default();
        };
        let link = |node: &NavNode| {
            node.permalink().map(|permalink| PageLink {
                label: node.label().to_owned(),
                permalink: permalink.to_owned(),
            })
        };

        Pagination {
            previous: idx
                .checked_sub(1)
                .and_then(|i| pages.get(i).copied())
                .and_then(link),
            next: pages.get(idx + 1).copied().and_then(link),
        }
    }
}

/// Items that open a document, in sidebar order.
fn collect_pages<'a>(items: &'a [NavNode], out: &mut Vec<&'a NavNode>) {
    for item in items {
        if item.document().is_some() {
            out.push(item);
        }
        collect_pages(item.items(), out);
    }
}

fn find_trail<'a>(items: &'a [NavNode], id: &DocumentId, trail: &mut Vec<&'a NavNode>) -> bool {
    for item in items {
        trail.push(item);
        if item.document() == Some(id) || find_trail(item.items(), id, trail) {
            return true;
        }
        trail.pop();
    }
    false
}
