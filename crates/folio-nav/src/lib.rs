//! Navigation for Folio.
//!
//! Builds the sidebar tree of a locale from its loaded documents and
//! `_category_.yml` sidecars, and derives per-document outlines.
//!
//! # Ordering
//!
//! Within a folder, items with a position (`sidebar_position` for
//! documents, the sidecar `position` or the folder index's
//! `sidebar_position` for categories) come first in ascending order.
//! Ties and unpositioned items fall back to lexical source path order, so
//! two builds over the same documents produce identical trees.
//!
//! # Example
//!
//! ```ignore
//! use folio_nav::{NavigationBuilder, table_of_contents};
//!
//! let navigation = NavigationBuilder::new("en")
//!     .with_categories(&categories)
//!     .build(&documents);
//! let crumbs = navigation.breadcrumbs(&documents[0].id);
//! let toc = table_of_contents(&documents[0], config.toc);
//! ```

mod builder;
mod navigation;
mod toc;

pub use builder::NavigationBuilder;
pub use navigation::{Breadcrumb, CategoryLink, NavNode, Navigation, PageLink, Pagination};
pub use toc::{TocEntry, headings, table_of_contents};
