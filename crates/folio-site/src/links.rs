//! Internal link checking.
//!
//! Links are resolved within one locale:
//! - `.md`/`.mdx` targets resolve against the linking file's folder and
//!   must name a loaded document of the same content kind.
//! - Other relative targets resolve against the linking page's URL;
//!   absolute targets (`/docs/intro`) are relative to the locale prefix.
//!   Either way they must match a known route.
//!
//! External links (`https:`, `mailto:`, `//host`), pure `#anchors` and
//! static assets (paths with a non-markdown file extension) are skipped.
//! Query strings and fragments are ignored.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use folio_config::{Locale, SiteConfig};
use folio_content::{Document, DocumentId, Inline, walk_inlines};
use regex::Regex;

use crate::error::{LinkError, LinkKind};
use crate::routes::{known_routes, normalize};

static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

fn scheme_regex() -> &'static Regex {
    SCHEME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("scheme regex is valid"))
}

/// Resolves links of one locale against its documents and routes.
pub(crate) struct LinkChecker<'a> {
    config: &'a SiteConfig,
    locale: &'a Locale,
    routes: BTreeSet<String>,
    sources: BTreeSet<&'a DocumentId>,
}

impl<'a> LinkChecker<'a> {
    pub fn new(config: &'a SiteConfig, locale: &'a Locale, documents: &'a [Document]) -> Self {
        Self {
            config,
            locale,
            routes: known_routes(config, locale, documents),
            sources: documents.iter().map(|d| &d.id).collect(),
        }
    }

    /// Check every link of every document, then navbar and footer targets.
    ///
    /// Findings come back in document order.
    pub fn check(&self, documents: &[Document]) -> Vec<LinkError> {
        let mut errors = Vec::new();
        for document in documents {
            walk_inlines(&document.tree, &mut |inline| {
                if let Inline::Link { target, .. } = inline
                    && let Some(kind) = self.check_document_link(document, target)
                {
                    errors.push(self.error(document.id.to_string(), target, kind));
                }
            });
        }

        let chrome = [
            ("navbar", self.config.navbar.internal_targets().collect::<Vec<_>>()),
            ("footer", self.config.footer.internal_targets().collect()),
        ];
        for (location, targets) in chrome {
            for target in targets {
                if !is_skipped(target) && !self.resolves_route(&self.absolute(target)) {
                    errors.push(self.error(location.to_owned(), target, LinkKind::Route));
                }
            }
        }
        errors
    }

    fn error(&self, location: String, target: &str, kind: LinkKind) -> LinkError {
        LinkError {
            locale: self.locale.tag.clone(),
            location,
            target: target.to_owned(),
            kind,
        }
    }

    /// Returns the failing link kind, or `None` when the link is fine.
    fn check_document_link(&self, document: &Document, target: &str) -> Option<LinkKind> {
        if is_skipped(target) {
            return None;
        }
        let path = strip_suffixes(target);

        if is_markdown(path) {
            let base = if path.starts_with('/') { "" } else { document.dir() };
            let resolved = resolve(base, path);
            let found = resolved.is_some_and(|path| {
                self.sources.contains(&DocumentId {
                    locale: document.id.locale.clone(),
                    kind: document.id.kind,
                    path,
                })
            });
            return (!found).then_some(LinkKind::Markdown);
        }

        let route = if path.starts_with('/') {
            Some(self.absolute(path))
        } else {
            let base = document
                .permalink
                .rsplit_once('/')
                .map_or("", |(dir, _)| dir);
            resolve(base, path).map(|p| format!("/{p}"))
        };
        let found = route.is_some_and(|route| self.resolves_route(&route));
        (!found).then_some(LinkKind::Route)
    }

    /// Site-absolute URL of a locale-relative absolute target.
    fn absolute(&self, target: &str) -> String {
        let mut url = self.config.locale_prefix(self.locale);
        url.push_str(strip_suffixes(target).trim_start_matches('/'));
        url
    }

    fn resolves_route(&self, route: &str) -> bool {
        self.routes.contains(normalize(route))
    }
}

/// External, anchor-only and asset links are not checked.
fn is_skipped(target: &str) -> bool {
    let path = strip_suffixes(target);
    target.starts_with('#')
        || target.starts_with("//")
        || scheme_regex().is_match(target)
        || path.is_empty()
        || is_asset(path)
}

fn strip_suffixes(target: &str) -> &str {
    let end = target.find(['#', '?']).unwrap_or(target.len());
    &target[..end]
}

fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

fn is_markdown(path: &str) -> bool {
    matches!(extension(path), Some("md" | "mdx"))
}

fn is_asset(path: &str) -> bool {
    extension(path).is_some_and(|ext| !matches!(ext, "md" | "mdx" | "html"))
}

/// Join `path` onto `base`, folding `.` and `..`. `None` if it escapes the root.
fn resolve(base: &str, path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}
