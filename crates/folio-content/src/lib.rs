//! Content loading for Folio.
//!
//! Discovers markdown sources per content kind and locale, parses their
//! front-matter and turns their bodies into content trees.
//!
//! # Architecture
//!
//! Loading happens in two phases:
//! 1. [`ContentLoader::scan`] walks a content root and returns a [`Scan`]
//!    holding [`DocumentRef`]s. No file content is read.
//! 2. [`Scan::load`] (or the lazy [`Scan::documents`] iterator) reads one
//!    file, splits off its front-matter and parses the markdown body.
//!
//! A missing content root is a [`NotFoundError`] and aborts the run. A
//! malformed document is a [`ParseError`] scoped to that file only.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_config::{ContentKind, SiteConfig};
//! use folio_content::ContentLoader;
//!
//! let config = Arc::new(SiteConfig::load(None, None)?);
//! let loader = ContentLoader::new(Arc::clone(&config));
//! let scan = loader.scan(ContentKind::Docs, config.default_locale())?;
//! for document in scan.documents() {
//!     println!("{}", document?.permalink);
//! }
//! ```

mod category;
mod document;
mod error;
mod front_matter;
mod loader;
mod scanner;
mod slug;
mod tree;

pub use category::{CategoryMeta, SidebarLink};
pub use document::{BlogMeta, Document, DocumentId};
pub use error::{NotFoundError, ParseError};
pub use front_matter::{FrontMatter, parse_front_matter, split_front_matter};
pub use loader::{ContentLoader, Scan};
pub use scanner::{CategoryRef, DocumentRef};
pub use slug::{slugify, titlecase_from_slug};
pub use tree::{Inline, Node, parse_markdown, parser_options, plain_text, walk_inlines, walk_nodes, word_count};
