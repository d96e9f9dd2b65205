//! Recoverable build findings.

use std::fmt;
use std::path::PathBuf;

use folio_content::ParseError;
use serde::Serialize;

use crate::error::LinkError;

/// Why a source file did not make it into the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message", rename_all = "snake_case")]
pub enum SkipReason {
    /// Malformed front-matter, unreadable file or invalid sidecar.
    Parse(String),
    /// `draft: true` while drafts are excluded.
    Draft,
}

/// Source file left out of the build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub locale: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

impl From<ParseError> for SkippedFile {
    fn from(err: ParseError) -> Self {
        Self {
            locale: err.locale,
            path: err.path,
            reason: SkipReason::Parse(err.message),
        }
    }
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::Parse(message) => {
                write!(f, "[{}] {}: {message}", self.locale, self.path.display())
            }
            SkipReason::Draft => write!(f, "[{}] {}: draft", self.locale, self.path.display()),
        }
    }
}

/// Everything a build skipped or warned about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Documents that made it into the site.
    pub documents: usize,
    pub skipped: Vec<SkippedFile>,
    /// Broken links under the `warn` policy.
    pub warnings: Vec<LinkError>,
}

impl BuildReport {
    /// No skipped files and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.warnings.is_empty()
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.documents += other.documents;
        self.skipped.extend(other.skipped);
        self.warnings.extend(other.warnings);
    }

    /// Put findings in a stable order regardless of thread scheduling.
    pub(crate) fn sort(&mut self) {
        self.skipped
            .sort_by(|a, b| (&a.locale, &a.path).cmp(&(&b.locale, &b.path)));
    }
}
