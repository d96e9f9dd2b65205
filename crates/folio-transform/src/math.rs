//! Math notation detection.
//!
//! The parser already delimits `$...$` and `$$...$$` spans (before emphasis,
//! and without blockquote or list prefixes); this transform claims them.
//! A paragraph holding nothing but one `$$` span becomes display math, as
//! does a ```` ```math ```` fence. Escaped dollars (`\$`) never delimit.

use folio_content::{Inline, Node};

use crate::NodeVisitor;

/// Tags math notation as [`Node::Math`] and [`Inline::Math`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MathTransform;

impl NodeVisitor for MathTransform {
    fn name(&self) -> &str {
        "math"
    }

    fn visit(&self, node: &mut Node) -> bool {
        match node {
            Node::CodeBlock {
                language: Some(language),
                source,
            } if language == "math" => {
                let source = source.trim_end().to_owned();
                *node = Node::Math {
                    source,
                    display: true,
                };
                true
            }
            Node::Paragraph { inlines, .. } => {
                if let Some(source) = display_math(inlines) {
                    *node = Node::Math {
                        source,
                        display: true,
                    };
                    return true;
                }
                claim_spans(inlines)
            }
            Node::Heading { inlines, .. } => claim_spans(inlines),
            Node::Table { head, rows } => {
                let mut changed = false;
                for cell in head.iter_mut().chain(rows.iter_mut().flatten()) {
                    changed |= claim_spans(cell);
                }
                changed
            }
            _ => false,
        }
    }
}

/// Body of a paragraph that is a lone `$$ ... $$` span.
fn display_math(inlines: &[Inline]) -> Option<String> {
    let mut content = inlines.iter().filter(|inline| match inline {
        Inline::SoftBreak | Inline::HardBreak => false,
        Inline::Text { text } => !text.trim().is_empty(),
        _ => true,
    });
    match (content.next(), content.next()) {
        (
            Some(Inline::DollarSpan {
                source,
                display: true,
            }),
            None,
        ) => {
            let source = source.trim();
            (!source.is_empty()).then(|| source.to_owned())
        }
        _ => None,
    }
}

/// Turn dollar spans into inline math, recursing into nested spans.
fn claim_spans(inlines: &mut [Inline]) -> bool {
    let mut changed = false;
    for inline in inlines {
        match inline {
            Inline::DollarSpan { source, display } => {
                let source = if *display {
                    source.trim().to_owned()
                } else {
                    std::mem::take(source)
                };
                *inline = Inline::Math { source };
                changed = true;
            }
            Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Strikethrough { children }
            | Inline::Link { children, .. } => changed |= claim_spans(children),
            _ => {}
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use folio_content::parse_markdown;
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text { text: s.to_owned() }
    }

    fn math(s: &str) -> Inline {
        Inline::Math {
            source: s.to_owned(),
        }
    }

    fn display(s: &str) -> Node {
        Node::Math {
            source: s.to_owned(),
            display: true,
        }
    }

    fn paragraph_inlines(markdown: &str) -> Vec<Inline> {
        let mut nodes = parse_markdown(markdown);
        MathTransform.visit(&mut nodes[0]);
        match nodes.remove(0) {
            Node::Paragraph { inlines, .. } => inlines,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_display_math_paragraph() {
        let mut nodes = parse_markdown("$$\n\\int_0^1 x\\,dx\n$$\n");
        assert!(MathTransform.visit(&mut nodes[0]));
        assert_eq!(nodes[0], display("\\int_0^1 x\\,dx"));
    }

    #[test]
    fn test_display_math_in_block_quote() {
        let mut nodes = parse_markdown("> $$\n> x^2\n> $$\n");
        let Node::BlockQuote { children } = &mut nodes[0] else {
            panic!("expected block quote");
        };
        assert!(MathTransform.visit(&mut children[0]));
        assert_eq!(children[0], display("x^2"));
    }

    #[test]
    fn test_display_math_in_list_item() {
        let mut nodes = parse_markdown("- $$\n  a +\n  b\n  $$\n");
        let Node::List { items, .. } = &mut nodes[0] else {
            panic!("expected list");
        };
        assert!(MathTransform.visit(&mut items[0][0]));
        assert_eq!(items[0][0], display("a +\nb"));
    }

    #[test]
    fn test_math_fence() {
        let mut nodes = parse_markdown("```math\nE = mc^2\n```\n");
        assert!(MathTransform.visit(&mut nodes[0]));
        assert_eq!(nodes[0], display("E = mc^2"));
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            paragraph_inlines("Euler: $e^{i\\pi}+1=0$ holds"),
            vec![text("Euler: "), math("e^{i\\pi}+1=0"), text(" holds")]
        );
        assert_eq!(
            paragraph_inlines("$a$ and $b$"),
            vec![math("a"), text(" and "), math("b")]
        );
    }

    #[test]
    fn test_inline_math_with_emphasis_markers() {
        assert_eq!(
            paragraph_inlines("Area $a*b*c$ here"),
            vec![text("Area "), math("a*b*c"), text(" here")]
        );
        assert_eq!(
            paragraph_inlines("Index $x_i + y_i$ only"),
            vec![text("Index "), math("x_i + y_i"), text(" only")]
        );
    }

    #[test]
    fn test_currency_is_not_math() {
        let mut nodes = parse_markdown("costs $5 and $ 10 today\n");
        assert!(!MathTransform.visit(&mut nodes[0]));
        let mut nodes = parse_markdown("a lone $ sign\n");
        assert!(!MathTransform.visit(&mut nodes[0]));
    }

    #[test]
    fn test_escaped_dollar_ignored() {
        assert_eq!(
            paragraph_inlines(r"Pay \$5 for $x$ now"),
            vec![
                text("Pay "),
                Inline::Escaped {
                    text: "$".to_owned()
                },
                text("5 for "),
                math("x"),
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_inline_math_in_emphasis_and_table() {
        let mut nodes = parse_markdown("*see $y$*\n\n| $z$ |\n|---|\n");
        assert!(MathTransform.visit(&mut nodes[0]));
        assert!(MathTransform.visit(&mut nodes[1]));
        assert!(matches!(
            &nodes[0],
            Node::Paragraph { inlines, .. }
                if inlines == &vec![Inline::Emphasis { children: vec![text("see "), math("y")] }]
        ));
        assert!(matches!(&nodes[1], Node::Table { head, .. } if head[0] == vec![math("z")]));
    }

    #[test]
    fn test_leaves_other_code_alone() {
        let mut node = Node::CodeBlock {
            language: Some("rust".to_owned()),
            source: "let x = 1;".to_owned(),
        };
        assert!(!MathTransform.visit(&mut node));
    }

    #[test]
    fn test_second_visit_is_noop() {
        let mut nodes = parse_markdown("Sum $a+b$ and 50$ later\n");
        assert!(MathTransform.visit(&mut nodes[0]));
        let once = nodes.clone();
        assert!(!MathTransform.visit(&mut nodes[0]));
        assert_eq!(nodes, once);
    }
}
