//! Content-tree transforms for Folio.
//!
//! A [`Pipeline`] is an ordered list of [`NodeVisitor`]s. It walks every
//! block of a document (recursing into lists and block quotes) and offers
//! each block to the visitors in registration order. Visitors replace or
//! tag nodes without knowing about each other.
//!
//! Order matters: with `["highlight", "math"]` a ```` ```math ```` fence is
//! claimed as highlighted code before the math visitor sees it. Tagged
//! nodes (`Math`, `Diagram`, `Highlighted`) are never re-wrapped, so running
//! a pipeline twice yields the same tree.
//!
//! # Example
//!
//! ```
//! use folio_content::{Node, parse_markdown};
//! use folio_transform::{DiagramTransform, HighlightTransform, Pipeline};
//!
//! let pipeline = Pipeline::new()
//!     .with(DiagramTransform)
//!     .with(HighlightTransform);
//!
//! let mut tree = parse_markdown("```mermaid\ngraph TD\n```\n");
//! pipeline.apply(&mut tree);
//! assert!(matches!(tree[0], Node::Diagram { .. }));
//! ```

mod diagram;
mod highlight;
mod math;

use folio_config::ConfigError;
use folio_content::{Document, Node};
use rayon::prelude::*;

pub use diagram::{DiagramTransform, diagram_language};
pub use highlight::HighlightTransform;
pub use math::MathTransform;

/// A single content-tree transform.
///
/// Visitors are shared across threads: documents are transformed in
/// parallel, each by the same visitor instances.
pub trait NodeVisitor: Send + Sync {
    /// Name used in configuration (e.g., "math").
    fn name(&self) -> &str;

    /// Inspect one block node, rewriting it in place.
    ///
    /// Returns `true` if the node was changed. Children of lists and block
    /// quotes are visited separately by the pipeline.
    fn visit(&self, node: &mut Node) -> bool;
}

/// Names accepted by [`Pipeline::from_names`].
pub const BUILTIN_TRANSFORMS: [&str; 3] = ["math", "diagram", "highlight"];

/// Fixed, ordered transform chain.
#[derive(Default)]
pub struct Pipeline {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visitor. Visitors run in the order they are added.
    #[must_use]
    pub fn with<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Resolve configured transform names into a pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown or repeated name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let mut pipeline = Self::new();
        for name in names {
            let name = name.as_ref();
            if pipeline.names().any(|existing| existing == name) {
                return Err(ConfigError::Validation(format!(
                    "transform '{name}' is listed more than once"
                )));
            }
            pipeline = match name {
                "math" => pipeline.with(MathTransform),
                "diagram" => pipeline.with(DiagramTransform),
                "highlight" => pipeline.with(HighlightTransform),
                other => {
                    return Err(ConfigError::Validation(format!(
                        "unknown transform '{other}' (expected one of: {})",
                        BUILTIN_TRANSFORMS.join(", ")
                    )));
                }
            };
        }
        Ok(pipeline)
    }

    /// Visitor names in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.visitors.iter().map(|v| v.name())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Transform a content tree in place. Returns the number of changes.
    pub fn apply(&self, nodes: &mut [Node]) -> usize {
        let mut changes = 0;
        for node in nodes {
            for visitor in &self.visitors {
                if visitor.visit(node) {
                    changes += 1;
                }
            }
            for children in node.children_mut() {
                changes += self.apply(children);
            }
        }
        changes
    }

    /// Transform one document's tree.
    pub fn apply_document(&self, document: &mut Document) -> usize {
        let changes = self.apply(&mut document.tree);
        tracing::trace!(document = %document.id, changes, "Applied transforms");
        changes
    }

    /// Transform documents in parallel. Each tree is owned by one worker.
    pub fn apply_all(&self, documents: &mut [Document]) -> usize {
        documents
            .par_iter_mut()
            .map(|document| self.apply_document(document))
            .sum()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
