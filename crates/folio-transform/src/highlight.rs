//! Syntax highlighting claims.

use folio_content::Node;

use crate::NodeVisitor;

/// Claims fenced code with a language for highlighting.
///
/// The renderer does the actual highlighting. Code without a language
/// stays a plain [`Node::CodeBlock`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HighlightTransform;

impl NodeVisitor for HighlightTransform {
    fn name(&self) -> &str {
        "highlight"
    }

    fn visit(&self, node: &mut Node) -> bool {
        let Node::CodeBlock {
            language: Some(language),
            source,
        } = node
        else {
            return false;
        };
        *node = Node::Highlighted {
            language: std::mem::take(language),
            source: std::mem::take(source),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_claims_code_with_language() {
        let mut node = Node::CodeBlock {
            language: Some("rust".to_owned()),
            source: "fn main() {}\n".to_owned(),
        };
        assert!(HighlightTransform.visit(&mut node));
        assert_eq!(
            node,
            Node::Highlighted {
                language: "rust".to_owned(),
                source: "fn main() {}\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_skips_code_without_language() {
        let mut node = Node::CodeBlock {
            language: None,
            source: "plain\n".to_owned(),
        };
        assert!(!HighlightTransform.visit(&mut node));
    }

    #[test]
    fn test_skips_tagged_nodes() {
        let mut node = Node::Diagram {
            language: "mermaid".to_owned(),
            source: "graph TD".to_owned(),
        };
        assert!(!HighlightTransform.visit(&mut node));
    }
}
