//! Assembled site tree.
//!
//! [`assemble`] is a pure merge of per-locale navigation, transformed
//! documents and configuration. It performs no I/O and either produces a
//! complete [`LocaleSite`] for every locale or fails as a whole.

use std::collections::BTreeMap;

use folio_config::{
    ConfigError, ContentKind, FooterConfig, Locale, NavbarConfig, SiteConfig, ThemeConfig,
};
use folio_content::{Document, DocumentId};
use folio_nav::{Breadcrumb, Navigation, Pagination, TocEntry, table_of_contents};
use serde::Serialize;

use crate::blog::{BlogIndex, blog_index};

/// Everything the renderer needs, partitioned by locale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteTree {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub trailing_slash: bool,
    pub theme: ThemeConfig,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
    /// Locales in declaration order.
    pub locales: Vec<LocaleSite>,
}

/// Content and navigation of one locale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocaleSite {
    pub locale: Locale,
    /// URL prefix of every route in this locale.
    pub root: String,
    pub navigation: Navigation,
    /// Pages sorted by document id.
    pub pages: Vec<SitePage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogIndex>,
}

/// A document with its derived page chrome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SitePage {
    #[serde(flatten)]
    pub document: Document,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toc: Vec<TocEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Sidebar neighbours (docs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl SiteTree {
    #[must_use]
    pub fn locale(&self, tag: &str) -> Option<&LocaleSite> {
        self.locales.iter().find(|l| l.locale.tag == tag)
    }

    /// Look up a page in any locale.
    #[must_use]
    pub fn page(&self, id: &DocumentId) -> Option<&SitePage> {
        self.locale(&id.locale)?.page(id)
    }
}

impl LocaleSite {
    #[must_use]
    pub fn page(&self, id: &DocumentId) -> Option<&SitePage> {
        self.pages
            .binary_search_by(|page| page.document.id.cmp(id))
            .ok()
            .map(|idx| &self.pages[idx])
    }
}

/// Merge navigation and documents into a site tree.
///
/// Locales with neither documents nor navigation are left out.
///
/// # Errors
///
/// Returns `ConfigError::Validation` if navigation or documents reference
/// an undeclared locale, a locale has two navigation trees, or a locale
/// has navigation but no loaded documents.
pub fn assemble(
    config: &SiteConfig,
    navigations: Vec<Navigation>,
    documents: Vec<Document>,
) -> Result<SiteTree, ConfigError> {
    let mut by_locale: BTreeMap<String, Vec<Document>> = BTreeMap::new();
    for document in documents {
        by_locale
            .entry(document.id.locale.clone())
            .or_default()
            .push(document);
    }
    if let Some(tag) = by_locale.keys().find(|tag| config.locale(tag).is_none()) {
        return Err(ConfigError::Validation(format!(
            "documents reference undeclared locale '{tag}'"
        )));
    }

    let mut navigation_by_locale: BTreeMap<String, Navigation> = BTreeMap::new();
    for navigation in navigations {
        let tag = navigation.locale.clone();
        if config.locale(&tag).is_none() {
            return Err(ConfigError::Validation(format!(
                "navigation references undeclared locale '{tag}'"
            )));
        }
        if !by_locale.contains_key(&tag) {
            return Err(ConfigError::Validation(format!(
                "locale '{tag}' has navigation but no loaded documents"
            )));
        }
        if navigation_by_locale.insert(tag.clone(), navigation).is_some() {
            return Err(ConfigError::Validation(format!(
                "locale '{tag}' has more than one navigation tree"
            )));
        }
    }

    let mut locales = Vec::new();
    for locale in &config.locales {
        let Some(documents) = by_locale.remove(&locale.tag) else {
            continue;
        };
        let navigation = navigation_by_locale
            .remove(&locale.tag)
            .unwrap_or_else(|| Navigation {
                locale: locale.tag.clone(),
                items: Vec::new(),
            });
        locales.push(locale_site(config, locale, navigation, documents));
    }

    Ok(SiteTree {
        title: config.title.clone(),
        tagline: config.tagline.clone(),
        url: config.url.clone(),
        base_url: config.base_url.clone(),
        favicon: config.favicon.clone(),
        trailing_slash: config.trailing_slash,
        theme: config.theme.clone(),
        navbar: config.navbar.clone(),
        footer: config.footer.clone(),
        locales,
    })
}

fn locale_site(
    config: &SiteConfig,
    locale: &Locale,
    navigation: Navigation,
    mut documents: Vec<Document>,
) -> LocaleSite {
    documents.sort_by(|a, b| a.id.cmp(&b.id));

    let blog = config
        .content(ContentKind::Blog)
        .and_then(|blog| blog_index(config, locale, blog, &documents));

    let pages: Vec<SitePage> = documents
        .into_iter()
        .map(|document| {
            let toc = table_of_contents(&document, config.toc);
            let (breadcrumbs, pagination) = if document.id.kind == ContentKind::Docs {
                (
                    navigation.breadcrumbs(&document.id),
                    Some(navigation.pagination(&document.id)),
                )
            } else {
                (Vec::new(), None)
            };
            SitePage {
                document,
                toc,
                breadcrumbs,
                pagination,
            }
        })
        .collect();

    tracing::debug!(locale = %locale.tag, pages = pages.len(), "Assembled locale");

    LocaleSite {
        locale: locale.clone(),
        root: config.locale_prefix(locale),
        navigation,
        pages,
        blog,
    }
}
