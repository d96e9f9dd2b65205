//! Diagram fence detection.
//!
//! Fences may name a Kroki diagram language directly (`mermaid`) or with a
//! `kroki-` prefix (`kroki-mermaid`). A few aliases map onto one canonical
//! name, which is what [`Node::Diagram`] records.

use folio_content::Node;

use crate::NodeVisitor;

/// Fence language -> canonical diagram language.
const DIAGRAM_LANGUAGES: &[(&str, &str)] = &[
    ("actdiag", "actdiag"),
    ("blockdiag", "blockdiag"),
    ("c4plantuml", "c4plantuml"),
    ("ditaa", "ditaa"),
    ("dot", "graphviz"),
    ("erd", "erd"),
    ("graphviz", "graphviz"),
    ("mermaid", "mermaid"),
    ("nomnoml", "nomnoml"),
    ("nwdiag", "nwdiag"),
    ("packetdiag", "packetdiag"),
    ("plantuml", "plantuml"),
    ("puml", "plantuml"),
    ("rackdiag", "rackdiag"),
    ("seqdiag", "seqdiag"),
    ("svgbob", "svgbob"),
    ("vega", "vega"),
    ("vegalite", "vegalite"),
    ("wavedrom", "wavedrom"),
];

/// Canonical diagram language for a fence info string, if it is one.
///
/// ```
/// use folio_transform::diagram_language;
///
/// assert_eq!(diagram_language("kroki-dot"), Some("graphviz"));
/// assert_eq!(diagram_language("rust"), None);
/// ```
#[must_use]
pub fn diagram_language(info: &str) -> Option<&'static str> {
    let name = info.strip_prefix("kroki-").unwrap_or(info);
    DIAGRAM_LANGUAGES
        .binary_search_by(|(alias, _)| (*alias).cmp(name))
        .ok()
        .map(|idx| DIAGRAM_LANGUAGES[idx].1)
}

/// Tags diagram-language code fences as [`Node::Diagram`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagramTransform;

impl NodeVisitor for DiagramTransform {
    fn name(&self) -> &str {
        "diagram"
    }

    fn visit(&self, node: &mut Node) -> bool {
        let Node::CodeBlock {
            language: Some(info),
            source,
        } = node
        else {
            return false;
        };
        let Some(language) = diagram_language(info) else {
            return false;
        };
        *node = Node::Diagram {
            language: language.to_owned(),
            source: std::mem::take(source),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn code(lang: Option<&str>, source: &str) -> Node {
        Node::CodeBlock {
            language: lang.map(str::to_owned),
            source: source.to_owned(),
        }
    }

    #[test]
    fn test_table_is_sorted() {
        assert!(DIAGRAM_LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_every_language_with_and_without_prefix() {
        for (alias, canonical) in DIAGRAM_LANGUAGES {
            assert_eq!(diagram_language(alias), Some(*canonical), "{alias}");
            let prefixed = format!("kroki-{alias}");
            assert_eq!(diagram_language(&prefixed), Some(*canonical), "{prefixed}");
        }
    }

    #[test]
    fn test_unknown_language() {
        assert_eq!(diagram_language("rust"), None);
        assert_eq!(diagram_language("kroki-unknown"), None);
        assert_eq!(diagram_language("Mermaid"), None);
    }

    #[test]
    fn test_visit_tags_diagram() {
        let mut node = code(Some("kroki-dot"), "digraph { a -> b }\n");
        assert!(DiagramTransform.visit(&mut node));
        assert_eq!(
            node,
            Node::Diagram {
                language: "graphviz".to_owned(),
                source: "digraph { a -> b }\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_visit_leaves_other_code() {
        let mut node = code(Some("rust"), "fn main() {}");
        assert!(!DiagramTransform.visit(&mut node));
        let mut node = code(None, "plain");
        assert!(!DiagramTransform.visit(&mut node));
        assert_eq!(node, code(None, "plain"));
    }
}
