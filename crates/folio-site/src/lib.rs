//! Site assembly for Folio.
//!
//! Ties the other crates together:
//! - [`SiteBuilder`] loads and transforms every locale's content, builds
//!   navigation, checks links and assembles the result.
//! - [`assemble`] merges navigation and documents into a [`SiteTree`]
//!   without touching the filesystem.
//! - [`BuildReport`] lists recoverable findings: skipped files and broken
//!   links under the `warn` policy.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_config::SiteConfig;
//! use folio_site::SiteBuilder;
//!
//! let config = Arc::new(SiteConfig::load(None, None)?);
//! let build = SiteBuilder::new(config)?.build()?;
//! let json = serde_json::to_string_pretty(&build.site)?;
//! for skipped in &build.report.skipped {
//!     eprintln!("skipped {skipped}");
//! }
//! ```

mod blog;
mod builder;
mod error;
mod links;
mod report;
mod routes;
mod site;

pub use blog::{BlogFeed, BlogIndex, FeedItem, TagPage, build_feed};
pub use builder::{SiteBuild, SiteBuilder};
pub use error::{BuildError, LinkError, LinkKind};
pub use report::{BuildReport, SkipReason, SkippedFile};
pub use site::{LocaleSite, SitePage, SiteTree, assemble};
