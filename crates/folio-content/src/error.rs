//! Content loading errors.
//!
//! [`NotFoundError`] is fatal for a run; [`ParseError`] is scoped to a
//! single document (or category sidecar) and is collected, not propagated.

use std::fmt;
use std::path::PathBuf;

use folio_config::ContentKind;

/// A content root does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{kind} directory for locale '{locale}' not found: {}", path.display())]
pub struct NotFoundError {
    /// Content kind whose root is missing.
    pub kind: ContentKind,
    /// Locale tag.
    pub locale: String,
    /// Missing directory.
    pub path: PathBuf,
}

/// A single source file could not be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ParseError {
    /// Source file path.
    pub path: PathBuf,
    /// Locale tag the file was loaded for.
    pub locale: String,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(path: impl Into<PathBuf>, locale: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            locale: locale.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.locale,
            self.path.display(),
            self.message
        )
    }
}
