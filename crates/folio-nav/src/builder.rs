//! Sidebar construction from loaded documents.
//!
//! Folders become categories and documents become leaves. Items are
//! ordered by `(has no position, position, source path)`: explicit
//! positions first, then everything else in lexical path order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use folio_config::ContentKind;
use folio_content::{CategoryMeta, Document, titlecase_from_slug};

use crate::navigation::{CategoryLink, NavNode, Navigation};

/// Builds a [`Navigation`] for one locale.
///
/// # Example
///
/// ```ignore
/// let navigation = NavigationBuilder::new("en")
///     .with_sidebar_collapsed(content.sidebar_collapsed)
///     .with_categories(&categories)
///     .build(&documents);
/// ```
#[derive(Debug)]
pub struct NavigationBuilder<'a> {
    locale: &'a str,
    sidebar_collapsed: bool,
    categories: BTreeMap<&'a str, &'a CategoryMeta>,
}

/// Folder node collected before sorting.
#[derive(Default)]
struct Folder<'a> {
    path: String,
    index: Option<&'a Document>,
    documents: Vec<&'a Document>,
    folders: BTreeMap<String, Folder<'a>>,
}

struct Entry {
    position: Option<f64>,
    path: String,
    node: NavNode,
}

impl<'a> NavigationBuilder<'a> {
    #[must_use]
    pub fn new(locale: &'a str) -> Self {
        Self {
            locale,
            sidebar_collapsed: false,
            categories: BTreeMap::new(),
        }
    }

    /// Default collapse state for categories without an override.
    #[must_use]
    pub fn with_sidebar_collapsed(mut self, collapsed: bool) -> Self {
        self.sidebar_collapsed = collapsed;
        self
    }

    /// Attach `_category_.yml` metadata, keyed by folder.
    #[must_use]
    pub fn with_categories(mut self, categories: &'a [CategoryMeta]) -> Self {
        self.categories = categories.iter().map(|meta| (meta.dir.as_str(), meta)).collect();
        self
    }

    /// Build the sidebar from the locale's docs. Other locales and content
    /// kinds are ignored.
    #[must_use]
    pub fn build(&self, documents: &[Document]) -> Navigation {
        let mut root = Folder::default();
        let mut count = 0;
        for document in documents
            .iter()
            .filter(|d| d.id.locale == self.locale && d.id.kind == ContentKind::Docs)
        {
            insert(&mut root, document);
            count += 1;
        }

        let items = self.folder_items(root);
        tracing::debug!(locale = self.locale, documents = count, items = items.len(), "Built navigation");

        Navigation {
            locale: self.locale.to_owned(),
            items,
        }
    }

    fn folder_items(&self, folder: Folder<'_>) -> Vec<NavNode> {
        let mut entries: Vec<Entry> = folder
            .documents
            .iter()
            .map(|document| Entry {
                position: document.sidebar_position(),
                path: document.id.path.clone(),
                node: NavNode::Doc {
                    id: document.id.clone(),
                    label: document.sidebar_label().to_owned(),
                    permalink: document.permalink.clone(),
                },
            })
            .collect();

        if let Some(meta) = self.categories.get(folder.path.as_str()) {
            entries.extend(meta.links.iter().map(|link| Entry {
                position: link.position,
                path: link.href.clone(),
                node: NavNode::Link {
                    label: link.label.clone(),
                    href: link.href.clone(),
                },
            }));
        }

        for sub in folder.folders.into_values() {
            entries.push(self.category(sub));
        }

        entries.sort_by(compare_entries);
        entries.into_iter().map(|entry| entry.node).collect()
    }

    fn category(&self, folder: Folder<'_>) -> Entry {
        let meta = self.categories.get(folder.path.as_str()).copied();
        let index = folder.index;
        let name = folder.path.rsplit('/').next().unwrap_or(&folder.path);

        let label = meta
            .and_then(|m| m.label.clone())
            .or_else(|| index.map(|d| d.title.clone()))
            .unwrap_or_else(|| titlecase_from_slug(name));
        let position = meta
            .and_then(|m| m.position)
            .or_else(|| index.and_then(Document::sidebar_position));
        let collapsible = meta.and_then(|m| m.collapsible).unwrap_or(true);
        let collapsed = collapsible
            && meta
                .and_then(|m| m.collapsed)
                .or_else(|| index.and_then(|d| d.front_matter.sidebar_collapsed))
                .unwrap_or(self.sidebar_collapsed);
        let link = index.map(|d| CategoryLink {
            id: d.id.clone(),
            permalink: d.permalink.clone(),
        });

        let path = folder.path.clone();
        Entry {
            position,
            path,
            node: NavNode::Category {
                label,
                link,
                collapsed,
                collapsible,
                items: self.folder_items(folder),
            },
        }
    }
}

fn insert<'a>(root: &mut Folder<'a>, document: &'a Document) {
    let dir = document.dir();
    let mut folder = root;
    if !dir.is_empty() {
        let mut path = String::new();
        for segment in dir.split('/') {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
            folder = folder.folders.entry(segment.to_owned()).or_insert_with(|| Folder {
                path: path.clone(),
                ..Folder::default()
            });
        }
    }

    // The root has no category, so its index stays a plain leaf.
    if document.is_index() && !dir.is_empty() && folder.index.is_none() {
        folder.index = Some(document);
    } else {
        folder.documents.push(document);
    }
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    let by_position = match (a.position, b.position) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_position.then_with(|| a.path.cmp(&b.path))
}
