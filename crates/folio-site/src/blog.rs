//! Blog index, tag pages and feed.

use std::collections::BTreeMap;

use folio_config::{ContentConfig, ContentKind, FeedType, Locale, SiteConfig};
use folio_content::{Document, DocumentId, slugify};
use serde::Serialize;

use crate::routes::{blog_index_url, tag_url};

/// Blog listing of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogIndex {
    pub permalink: String,
    /// Posts, newest first.
    pub posts: Vec<DocumentId>,
    /// Tag pages sorted by URL slug.
    pub tags: Vec<TagPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<BlogFeed>,
}

/// Posts sharing one tag.
///
/// Tags whose labels slugify alike (`C++` and `c`) share a page, labelled
/// with the spelling of the newest post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagPage {
    pub label: String,
    pub permalink: String,
    pub posts: Vec<DocumentId>,
}

/// Feed content handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogFeed {
    /// Concrete formats (`all` expanded).
    pub formats: Vec<FeedType>,
    pub items: Vec<FeedItem>,
}

/// Single feed entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: DocumentId,
    pub title: String,
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

fn post_date(document: &Document) -> Option<&str> {
    document.blog.as_ref().and_then(|b| b.date.as_deref())
}

/// Blog posts of a locale, newest first. Undated posts go last.
fn sorted_posts(documents: &[Document]) -> Vec<&Document> {
    let mut posts: Vec<&Document> = documents
        .iter()
        .filter(|d| d.id.kind == ContentKind::Blog)
        .collect();
    posts.sort_by(|a, b| {
        post_date(b)
            .cmp(&post_date(a))
            .then_with(|| a.permalink.cmp(&b.permalink))
    });
    posts
}

fn expand_formats(feed: FeedType) -> Vec<FeedType> {
    match feed {
        FeedType::All => vec![FeedType::Rss, FeedType::Atom, FeedType::Json],
        other => vec![other],
    }
}

/// Feed entries: non-draft posts that did not opt out, newest first.
#[must_use]
pub fn build_feed(documents: &[Document], feed: FeedType) -> BlogFeed {
    let items = sorted_posts(documents)
        .into_iter()
        .filter(|d| !d.is_draft() && !d.front_matter.excluded_from_feed())
        .map(|d| FeedItem {
            id: d.id.clone(),
            title: d.title.clone(),
            permalink: d.permalink.clone(),
            date: post_date(d).map(str::to_owned),
            description: d.front_matter.description.clone(),
            authors: d.front_matter.authors.clone(),
        })
        .collect();
    BlogFeed {
        formats: expand_formats(feed),
        items,
    }
}

/// Blog index for a locale, or `None` when it has no posts.
pub(crate) fn blog_index(
    config: &SiteConfig,
    locale: &Locale,
    blog: &ContentConfig,
    documents: &[Document],
) -> Option<BlogIndex> {
    let posts = sorted_posts(documents);
    if posts.is_empty() {
        return None;
    }

    let mut tags: BTreeMap<String, TagPage> = BTreeMap::new();
    for post in &posts {
        for label in &post.front_matter.tags {
            let slug = slugify(label);
            if slug.is_empty() {
                tracing::warn!(document = %post.id, tag = %label, "Ignoring tag with no URL-safe characters");
                continue;
            }
            let page = tags.entry(slug).or_insert_with(|| TagPage {
                label: label.clone(),
                permalink: tag_url(config, locale, blog, label),
                posts: Vec::new(),
            });
            if !page.posts.contains(&post.id) {
                page.posts.push(post.id.clone());
            }
        }
    }

    Some(BlogIndex {
        permalink: blog_index_url(config, locale, blog),
        posts: posts.iter().map(|d| d.id.clone()).collect(),
        tags: tags.into_values().collect(),
        feed: blog.feed.map(|feed| build_feed(documents, feed)),
    })
}
