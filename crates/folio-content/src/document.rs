//! Loaded documents.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use folio_config::{ContentConfig, ContentKind, Locale, SiteConfig, TocConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::front_matter::{FrontMatter, parse_front_matter, split_front_matter};
use crate::scanner::DocumentRef;
use crate::slug::titlecase_from_slug;
use crate::tree::{Node, parse_markdown, word_count};

/// Words per minute used for blog reading time.
const WORDS_PER_MINUTE: usize = 200;

/// Stable document identity: locale, content kind and source path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId {
    pub locale: String,
    pub kind: ContentKind,
    /// Source path relative to the content root (e.g., "guide/setup.md").
    pub path: String,
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.locale, self.kind, self.path)
    }
}

/// Blog-specific document data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogMeta {
    /// Publication date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Estimated reading time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}

/// A markdown source file turned into a content tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub front_matter: FrontMatter,
    /// Raw file content, front-matter included.
    #[serde(skip)]
    pub raw: String,
    pub tree: Vec<Node>,
    /// Site-absolute URL path.
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<BlogMeta>,
}

impl Document {
    /// Build a document from a source file's content.
    ///
    /// `root` is the content root the file was found under.
    ///
    /// # Errors
    ///
    /// Returns a message for malformed front-matter, an invalid `date`, or
    /// TOC bounds that do not satisfy `min <= max`.
    pub fn from_source(
        config: &SiteConfig,
        content: &ContentConfig,
        locale: &Locale,
        root: &Path,
        doc_ref: &DocumentRef,
        raw: String,
    ) -> Result<Self, String> {
        let (yaml, body) = split_front_matter(&raw)?;
        let front_matter = yaml.map(parse_front_matter).transpose()?.unwrap_or_default();

        let bounds = toc_bounds(&front_matter, config.toc);
        bounds
            .validate("front-matter toc")
            .map_err(|e| e.to_string())?;

        let tree = parse_markdown(body);
        let rel_path = doc_ref.rel_path.clone();

        let blog = match content.kind {
            ContentKind::Blog => Some(blog_meta(&front_matter, &rel_path, &tree, content)?),
            ContentKind::Docs | ContentKind::Pages => None,
        };

        let title = front_matter
            .title
            .clone()
            .or_else(|| first_h1(&tree))
            .unwrap_or_else(|| title_from_path(&rel_path));

        let permalink = permalink(config, content, locale, &rel_path, front_matter.slug.as_deref());
        let edit_url = edit_url(config, content, root, &rel_path, &front_matter);

        Ok(Self {
            id: DocumentId {
                locale: locale.tag.clone(),
                kind: content.kind,
                path: rel_path,
            },
            title,
            front_matter,
            raw,
            tree,
            permalink,
            edit_url,
            blog,
        })
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.front_matter.draft
    }

    /// Label shown in the sidebar.
    #[must_use]
    pub fn sidebar_label(&self) -> &str {
        self.front_matter.sidebar_label.as_deref().unwrap_or(&self.title)
    }

    #[must_use]
    pub fn sidebar_position(&self) -> Option<f64> {
        self.front_matter.sidebar_position
    }

    /// Folder the source file lives in, relative to the content root.
    #[must_use]
    pub fn dir(&self) -> &str {
        self.id.path.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Whether this is a folder's `index` document.
    #[must_use]
    pub fn is_index(&self) -> bool {
        file_stem(&self.id.path) == "index"
    }

    /// TOC bounds after applying front-matter overrides to `defaults`.
    #[must_use]
    pub fn toc_bounds(&self, defaults: TocConfig) -> TocConfig {
        toc_bounds(&self.front_matter, defaults)
    }
}

/// Front-matter narrows the configured bounds. A single override widens
/// the other bound when needed so the range never becomes empty.
fn toc_bounds(front_matter: &FrontMatter, defaults: TocConfig) -> TocConfig {
    let (min_heading_level, max_heading_level) = match (
        front_matter.toc_min_heading_level,
        front_matter.toc_max_heading_level,
    ) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, defaults.max_heading_level.max(min)),
        (None, Some(max)) => (defaults.min_heading_level.min(max), max),
        (None, None) => return defaults,
    };
    TocConfig {
        min_heading_level,
        max_heading_level,
    }
}

fn first_h1(tree: &[Node]) -> Option<String> {
    tree.iter().find_map(|node| match node {
        Node::Heading { level: 1, text, .. } if !text.is_empty() => Some(text.clone()),
        _ => None,
    })
}

static DATE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_prefix_regex() -> &'static Regex {
    DATE_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})[-_](.+)$").expect("date prefix regex is valid")
    })
}

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").expect("date regex is valid"))
}

/// Split a `2024-01-31-hello` style name into date and slug.
fn split_date_prefix(name: &str) -> Option<(&str, &str)> {
    let captures = date_prefix_regex().captures(name)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

fn file_stem(rel_path: &str) -> &str {
    let name = rel_path.rsplit_once('/').map_or(rel_path, |(_, name)| name);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

fn title_from_path(rel_path: &str) -> String {
    let mut segments: Vec<&str> = rel_path.split('/').collect();
    let stem = file_stem(rel_path);
    let name = if stem == "index" && segments.len() > 1 {
        segments.pop();
        segments.last().copied().unwrap_or(stem)
    } else {
        stem
    };
    let name = split_date_prefix(name).map_or(name, |(_, slug)| slug);
    titlecase_from_slug(name)
}

fn blog_meta(
    front_matter: &FrontMatter,
    rel_path: &str,
    tree: &[Node],
    content: &ContentConfig,
) -> Result<BlogMeta, String> {
    let date = match &front_matter.date {
        Some(date) => {
            let captures = date_regex()
                .captures(date)
                .ok_or_else(|| format!("Invalid date '{date}': expected YYYY-MM-DD"))?;
            captures.get(1).map(|m| m.as_str().to_owned())
        }
        None => split_date_prefix(file_stem(rel_path)).map(|(date, _)| date.to_owned()),
    };

    let reading_time = content.show_reading_time.then(|| {
        let minutes = word_count(tree).div_ceil(WORDS_PER_MINUTE).max(1);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    });

    Ok(BlogMeta { date, reading_time })
}

/// Route path of a source file within its content root.
///
/// `guide/index.md` -> `guide`, `2024-01-31-hello.md` (blog) -> `hello`.
fn route_path(kind: ContentKind, rel_path: &str, slug: Option<&str>) -> String {
    let mut segments: Vec<&str> = rel_path.split('/').collect();
    segments.pop();

    let stem = file_stem(rel_path);
    let stem = match kind {
        ContentKind::Blog => split_date_prefix(stem).map_or(stem, |(_, slug)| slug),
        ContentKind::Docs | ContentKind::Pages => stem,
    };

    match slug {
        Some(slug) if slug.starts_with('/') => return slug.trim_matches('/').to_owned(),
        Some(slug) => segments.push(slug.trim_matches('/')),
        None if stem == "index" => {}
        None => segments.push(stem),
    }
    segments.join("/")
}

fn permalink(
    config: &SiteConfig,
    content: &ContentConfig,
    locale: &Locale,
    rel_path: &str,
    slug: Option<&str>,
) -> String {
    let route = route_path(content.kind, rel_path, slug);
    let segments: Vec<&str> = content
        .route_base
        .split('/')
        .chain(route.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    let mut url = config.locale_prefix(locale);
    if segments.is_empty() {
        return url;
    }
    url.push_str(&segments.join("/"));
    if config.trailing_slash {
        url.push('/');
    }
    url
}

fn edit_url(
    config: &SiteConfig,
    content: &ContentConfig,
    root: &Path,
    rel_path: &str,
    front_matter: &FrontMatter,
) -> Option<String> {
    if let Some(custom) = &front_matter.custom_edit_url {
        return Some(custom.clone());
    }
    let base = content.edit_url.as_deref()?;
    let root_rel = root.strip_prefix(&config.site_dir).unwrap_or(root);
    let mut path: Vec<String> = root_rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    path.push(rel_path.to_owned());
    Some(format!("{}/{}", base.trim_end_matches('/'), path.join("/")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CONFIG: &str = r#"
base_url = "/"

[[locales]]
tag = "en"
default = true

[[locales]]
tag = "de"

[docs]
edit_url = "https://github.com/example/site/edit/main/"

[blog]
show_reading_time = true
"#;

    fn config(extra: &str) -> SiteConfig {
        // Extra keys are top-level, so they go before the first table.
        SiteConfig::parse(&format!("{extra}{CONFIG}"), Path::new("/site")).unwrap()
    }

    fn load(config: &SiteConfig, kind: ContentKind, locale: &str, rel: &str, raw: &str) -> Result<Document, String> {
        let content = config.content(kind).unwrap();
        let locale = config.locale(locale).unwrap();
        let root = config.content_root(content, locale);
        let doc_ref = DocumentRef {
            rel_path: rel.to_owned(),
            abs_path: root.join(rel),
        };
        Document::from_source(config, content, locale, &root, &doc_ref, raw.to_owned())
    }

    #[test]
    fn test_title_resolution_order() {
        let config = config("");
        let doc = load(&config, ContentKind::Docs, "en", "a.md", "---\ntitle: FM\n---\n# H1\n").unwrap();
        assert_eq!(doc.title, "FM");
        let doc = load(&config, ContentKind::Docs, "en", "a.md", "# H1 Title\n").unwrap();
        assert_eq!(doc.title, "H1 Title");
        let doc = load(&config, ContentKind::Docs, "en", "getting-started.md", "text").unwrap();
        assert_eq!(doc.title, "Getting Started");
        let doc = load(&config, ContentKind::Docs, "en", "api-guide/index.md", "text").unwrap();
        assert_eq!(doc.title, "Api Guide");
    }

    #[test]
    fn test_permalinks() {
        let config = config("");
        let cases = [
            ("intro.md", "/docs/intro"),
            ("index.md", "/docs"),
            ("guide/index.md", "/docs/guide"),
            ("guide/setup.mdx", "/docs/guide/setup"),
        ];
        for (rel, expected) in cases {
            let doc = load(&config, ContentKind::Docs, "en", rel, "x").unwrap();
            assert_eq!(doc.permalink, expected, "{rel}");
        }

        let doc = load(&config, ContentKind::Docs, "de", "guide/setup.md", "x").unwrap();
        assert_eq!(doc.permalink, "/de/docs/guide/setup");
    }

    #[test]
    fn test_permalink_trailing_slash_and_slug() {
        let config = config("trailing_slash = true\n");
        let doc = load(&config, ContentKind::Docs, "en", "guide/setup.md", "---\nslug: install\n---\n").unwrap();
        assert_eq!(doc.permalink, "/docs/guide/install/");
        let doc = load(&config, ContentKind::Docs, "en", "guide/setup.md", "---\nslug: /start\n---\n").unwrap();
        assert_eq!(doc.permalink, "/docs/start/");
        let doc = load(&config, ContentKind::Docs, "en", "index.md", "x").unwrap();
        assert_eq!(doc.permalink, "/docs/");
    }

    #[test]
    fn test_edit_url() {
        let config = config("");
        let doc = load(&config, ContentKind::Docs, "en", "guide/setup.md", "x").unwrap();
        assert_eq!(
            doc.edit_url.as_deref(),
            Some("https://github.com/example/site/edit/main/docs/guide/setup.md")
        );
        let doc = load(&config, ContentKind::Docs, "de", "a.md", "x").unwrap();
        assert_eq!(
            doc.edit_url.as_deref(),
            Some("https://github.com/example/site/edit/main/i18n/de/docs/a.md")
        );
        let doc = load(
            &config,
            ContentKind::Docs,
            "en",
            "a.md",
            "---\ncustom_edit_url: https://elsewhere.example/a\n---\n",
        )
        .unwrap();
        assert_eq!(doc.edit_url.as_deref(), Some("https://elsewhere.example/a"));

        let doc = load(&config, ContentKind::Blog, "en", "post.md", "x").unwrap();
        assert!(doc.edit_url.is_none());
    }

    #[test]
    fn test_blog_date_from_filename() {
        let config = config("");
        let doc = load(&config, ContentKind::Blog, "en", "2024-01-31-launch.md", "# Launch\n\nWe shipped.").unwrap();
        assert_eq!(doc.permalink, "/blog/launch");
        assert_eq!(
            doc.blog,
            Some(BlogMeta {
                date: Some("2024-01-31".to_owned()),
                reading_time: Some(1),
            })
        );
    }

    #[test]
    fn test_blog_date_from_front_matter() {
        let config = config("");
        let doc = load(&config, ContentKind::Blog, "en", "launch.md", "---\ndate: 2023-05-06T10:00:00Z\n---\n").unwrap();
        assert_eq!(doc.blog.unwrap().date.as_deref(), Some("2023-05-06"));
    }

    #[test]
    fn test_blog_reading_time_rounds_up() {
        let config = config("");
        let body = "word ".repeat(450);
        let doc = load(&config, ContentKind::Blog, "en", "long.md", &body).unwrap();
        assert_eq!(doc.blog.unwrap().reading_time, Some(3));
    }

    #[test]
    fn test_invalid_date_is_error() {
        let config = config("");
        let err = load(&config, ContentKind::Blog, "en", "p.md", "---\ndate: yesterday\n---\n").unwrap_err();
        assert!(err.contains("Invalid date"));
    }

    #[test]
    fn test_toc_override_pair_must_be_ordered() {
        let config = config("");
        let err = load(
            &config,
            ContentKind::Docs,
            "en",
            "a.md",
            "---\ntoc_min_heading_level: 5\ntoc_max_heading_level: 4\n---\n",
        )
        .unwrap_err();
        assert!(err.contains("min_heading_level (5)"), "{err}");

        let err = load(&config, ContentKind::Docs, "en", "a.md", "---\ntoc_max_heading_level: 7\n---\n").unwrap_err();
        assert!(err.contains("between 2 and 6"), "{err}");
    }

    #[test]
    fn test_single_toc_override_keeps_range_non_empty() {
        let config = config("");
        assert_eq!(config.toc.max_heading_level, 3);

        let doc = load(&config, ContentKind::Docs, "en", "a.md", "---\ntoc_min_heading_level: 4\n---\n# A").unwrap();
        assert_eq!(
            doc.toc_bounds(config.toc),
            TocConfig {
                min_heading_level: 4,
                max_heading_level: 4,
            }
        );

        let doc = load(&config, ContentKind::Docs, "en", "a.md", "---\ntoc_max_heading_level: 5\n---\n").unwrap();
        assert_eq!(
            doc.toc_bounds(config.toc),
            TocConfig {
                min_heading_level: 2,
                max_heading_level: 5,
            }
        );

        let toml = format!("{CONFIG}\n[toc]\nmin_heading_level = 3\nmax_heading_level = 4\n");
        let narrow = SiteConfig::parse(&toml, Path::new("/site")).unwrap();
        let doc = load(&narrow, ContentKind::Docs, "en", "a.md", "---\ntoc_max_heading_level: 2\n---\n").unwrap();
        assert_eq!(
            doc.toc_bounds(narrow.toc),
            TocConfig {
                min_heading_level: 2,
                max_heading_level: 2,
            }
        );
    }

    #[test]
    fn test_document_id_display_and_helpers() {
        let config = config("");
        let doc = load(&config, ContentKind::Docs, "de", "guide/index.md", "x").unwrap();
        assert_eq!(doc.id.to_string(), "de:docs/guide/index.md");
        assert_eq!(doc.dir(), "guide");
        assert!(doc.is_index());
        assert_eq!(doc.sidebar_label(), "Guide");
        assert_eq!(doc.raw, "x");
    }
}
