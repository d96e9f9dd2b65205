//! Build errors.

use std::fmt;

use folio_config::ConfigError;
use folio_content::NotFoundError;
use serde::Serialize;

/// Which policy governs a broken link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Link to a `.md`/`.mdx` source file (`on_broken_markdown_links`).
    Markdown,
    /// Link to a site route (`on_broken_links`).
    Route,
}

/// Internal link that does not resolve to a known route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
pub struct LinkError {
    /// Locale the link was checked in.
    pub locale: String,
    /// Where the link was found (document id, `navbar` or `footer`).
    pub location: String,
    /// Link target as written.
    pub target: String,
    pub kind: LinkKind,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            LinkKind::Markdown => "markdown link",
            LinkKind::Route => "link",
        };
        write!(f, "Broken {what} '{}' in {} [{}]", self.target, self.location, self.locale)
    }
}

/// Fatal build error. The first cause aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    BrokenLink(#[from] LinkError),
}
