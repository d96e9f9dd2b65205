//! Markdown to content tree conversion.
//!
//! The content tree is a sequence of block [`Node`]s, each holding its
//! [`Inline`] children. Transforms rewrite it in place; the renderer turns
//! it into markup.
//!
//! `Math`, `Diagram` and `Highlighted` blocks are produced only by
//! transforms. Parsing never emits them.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::slug::Slugger;

/// Block-level content node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Heading {
        level: u8,
        /// Plain text of the heading.
        text: String,
        /// Unique anchor within the document.
        anchor: String,
        inlines: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
        /// Markdown source the paragraph was parsed from.
        source: String,
    },
    /// Code block not claimed by any transform.
    CodeBlock {
        language: Option<String>,
        source: String,
    },
    /// Math notation for the renderer to typeset.
    Math { source: String, display: bool },
    /// Diagram source for the renderer to draw.
    Diagram { language: String, source: String },
    /// Code claimed for syntax highlighting.
    Highlighted { language: String, source: String },
    List {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        items: Vec<Vec<Node>>,
    },
    BlockQuote { children: Vec<Node> },
    Table {
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    Html { html: String },
    Rule,
}

/// Inline content node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    /// Literal text written with a backslash escape (e.g. `\$`).
    Escaped { text: String },
    Code { code: String },
    /// `$...$` or `$$...$$` span as written. Stays literal text unless the
    /// `math` transform claims it.
    DollarSpan { source: String, display: bool },
    Math { source: String },
    Emphasis { children: Vec<Inline> },
    Strong { children: Vec<Inline> },
    Strikethrough { children: Vec<Inline> },
    Link { target: String, children: Vec<Inline> },
    Image { src: String, alt: String },
    TaskMarker { checked: bool },
    SoftBreak,
    HardBreak,
    Html { html: String },
}

impl Node {
    /// Whether a transform has already claimed this node.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        matches!(
            self,
            Self::Math { .. } | Self::Diagram { .. } | Self::Highlighted { .. }
        )
    }

    /// Nested block lists (list items, quote children).
    pub fn children_mut(&mut self) -> Vec<&mut Vec<Node>> {
        match self {
            Self::List { items, .. } => items.iter_mut().collect(),
            Self::BlockQuote { children } => vec![children],
            _ => Vec::new(),
        }
    }
}

/// Parser options for document content.
///
/// Dollar spans are delimited before emphasis, so `$a*b*c$` stays one
/// span. They are reported as [`Inline::DollarSpan`], not as math.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
        | Options::ENABLE_MATH
}

/// Parse markdown (without front-matter) into a content tree.
#[must_use]
pub fn parse_markdown(markdown: &str) -> Vec<Node> {
    TreeBuilder::new(markdown).build()
}

/// Concatenated plain text of inline content.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(inlines, &mut out);
    out
}

fn push_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text { text } | Inline::Escaped { text } => out.push_str(text),
            Inline::Code { code } => out.push_str(code),
            Inline::DollarSpan { source, display } => {
                let fence = if *display { "$$" } else { "$" };
                out.push_str(fence);
                out.push_str(source);
                out.push_str(fence);
            }
            Inline::Math { source } => out.push_str(source),
            Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Strikethrough { children }
            | Inline::Link { children, .. } => push_plain_text(children, out),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::TaskMarker { .. } | Inline::Html { .. } => {}
        }
    }
}

/// Call `f` for every block node, depth first.
pub fn walk_nodes<'a>(nodes: &'a [Node], f: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        f(node);
        match node {
            Node::List { items, .. } => {
                for item in items {
                    walk_nodes(item, f);
                }
            }
            Node::BlockQuote { children } => walk_nodes(children, f),
            _ => {}
        }
    }
}

/// Call `f` for every inline node, depth first, including nested spans.
pub fn walk_inlines<'a>(nodes: &'a [Node], f: &mut impl FnMut(&'a Inline)) {
    fn walk<'a>(inlines: &'a [Inline], f: &mut impl FnMut(&'a Inline)) {
        for inline in inlines {
            f(inline);
            if let Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Strikethrough { children }
            | Inline::Link { children, .. } = inline
            {
                walk(children, f);
            }
        }
    }

    walk_nodes(nodes, &mut |node| match node {
        Node::Heading { inlines, .. } | Node::Paragraph { inlines, .. } => walk(inlines, f),
        Node::Table { head, rows } => {
            for cell in head.iter().chain(rows.iter().flatten()) {
                walk(cell, f);
            }
        }
        _ => {}
    });
}

/// Number of whitespace-separated words in prose and code.
#[must_use]
pub fn word_count(nodes: &[Node]) -> usize {
    let mut count = 0;
    walk_nodes(nodes, &mut |node| {
        count += match node {
            Node::Heading { text, .. } => text.split_whitespace().count(),
            Node::Paragraph { inlines, .. } => plain_text(inlines).split_whitespace().count(),
            Node::Table { head, rows } => head
                .iter()
                .chain(rows.iter().flatten())
                .map(|cell| plain_text(cell).split_whitespace().count())
                .sum(),
            Node::CodeBlock { source, .. }
            | Node::Math { source, .. }
            | Node::Diagram { source, .. }
            | Node::Highlighted { source, .. } => source.split_whitespace().count(),
            _ => 0,
        };
    });
    count
}

enum BlockKind {
    Root,
    Quote,
    Item,
    /// Container whose children are spliced into the parent.
    Transparent,
}

enum LeafKind {
    Paragraph,
    Heading { level: u8, id: Option<String> },
    Cell,
    /// Paragraph implied by text directly inside a tight list item.
    Implicit,
}

enum SpanKind {
    Emphasis,
    Strong,
    Strikethrough,
    Link { target: String },
    Image { src: String },
    Transparent,
}

enum Frame {
    Blocks {
        kind: BlockKind,
        nodes: Vec<Node>,
    },
    List {
        start: Option<u64>,
        items: Vec<Vec<Node>>,
    },
    Table {
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
        row: Vec<Vec<Inline>>,
    },
    Leaf {
        kind: LeafKind,
        inlines: Vec<Inline>,
        range: Range<usize>,
    },
    Span {
        kind: SpanKind,
        children: Vec<Inline>,
    },
    Code {
        language: Option<String>,
        source: String,
    },
    Html {
        html: String,
        keep: bool,
    },
}

/// Builds a content tree from pulldown-cmark events using a frame stack.
struct TreeBuilder<'a> {
    markdown: &'a str,
    stack: Vec<Frame>,
    slugger: Slugger,
}

impl<'a> TreeBuilder<'a> {
    fn new(markdown: &'a str) -> Self {
        Self {
            markdown,
            stack: vec![Frame::Blocks {
                kind: BlockKind::Root,
                nodes: Vec::new(),
            }],
            slugger: Slugger::default(),
        }
    }

    fn build(mut self) -> Vec<Node> {
        let parser = Parser::new_ext(self.markdown, parser_options()).into_offset_iter();
        for (event, range) in parser {
            self.process_event(event, range);
        }
        self.close_implicit();

        match self.stack.into_iter().next() {
            Some(Frame::Blocks { nodes, .. }) => nodes,
            _ => Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start_tag(tag, range),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text, range),
            Event::Code(code) => self.push_inline(
                Inline::Code {
                    code: code.into_string(),
                },
                range,
            ),
            Event::InlineMath(source) => self.push_inline(
                Inline::DollarSpan {
                    source: source.into_string(),
                    display: false,
                },
                range,
            ),
            Event::DisplayMath(source) => self.push_inline(
                Inline::DollarSpan {
                    source: source.into_string(),
                    display: true,
                },
                range,
            ),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.push_inline(
                Inline::Html {
                    html: html.into_string(),
                },
                range,
            ),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak, range),
            Event::HardBreak => self.push_inline(Inline::HardBreak, range),
            Event::Rule => self.push_block(Node::Rule),
            Event::TaskListMarker(checked) => {
                self.push_inline(Inline::TaskMarker { checked }, range);
            }
            Event::FootnoteReference(label) => self.push_inline(
                Inline::Text {
                    text: format!("[^{label}]"),
                },
                range,
            ),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>, range: Range<usize>) {
        match tag {
            Tag::Paragraph => self.open_leaf(LeafKind::Paragraph, range),
            Tag::Heading { level, id, .. } => {
                let id = id.map(|id| id.into_string());
                if let Some(id) = &id {
                    self.slugger.reserve(id);
                }
                self.open_leaf(
                    LeafKind::Heading {
                        level: heading_level_to_num(level),
                        id,
                    },
                    range,
                );
            }
            Tag::BlockQuote(_) => self.open_blocks(BlockKind::Quote),
            Tag::CodeBlock(kind) => {
                self.close_implicit();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.stack.push(Frame::Code {
                    language,
                    source: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.close_implicit();
                self.stack.push(Frame::Html {
                    html: String::new(),
                    keep: true,
                });
            }
            Tag::MetadataBlock(_) => self.stack.push(Frame::Html {
                html: String::new(),
                keep: false,
            }),
            Tag::List(start) => {
                self.close_implicit();
                self.stack.push(Frame::List {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.stack.push(Frame::Blocks {
                kind: BlockKind::Item,
                nodes: Vec::new(),
            }),
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => self.open_blocks(BlockKind::Transparent),
            Tag::Table(_) => {
                self.close_implicit();
                self.stack.push(Frame::Table {
                    head: Vec::new(),
                    rows: Vec::new(),
                    row: Vec::new(),
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(Frame::Table { row, .. }) = self.stack.last_mut() {
                    row.clear();
                }
            }
            Tag::TableCell => self.stack.push(Frame::Leaf {
                kind: LeafKind::Cell,
                inlines: Vec::new(),
                range,
            }),
            Tag::Emphasis => self.open_span(SpanKind::Emphasis, range),
            Tag::Strong => self.open_span(SpanKind::Strong, range),
            Tag::Strikethrough => self.open_span(SpanKind::Strikethrough, range),
            Tag::Link { dest_url, .. } => self.open_span(
                SpanKind::Link {
                    target: dest_url.into_string(),
                },
                range,
            ),
            Tag::Image { dest_url, .. } => self.open_span(
                SpanKind::Image {
                    src: dest_url.into_string(),
                },
                range,
            ),
            Tag::Superscript | Tag::Subscript => self.open_span(SpanKind::Transparent, range),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.close_leaf(),
            TagEnd::BlockQuote(_) => {
                if let Some(children) = self.close_blocks() {
                    self.push_block(Node::BlockQuote { children });
                }
            }
            TagEnd::CodeBlock => {
                if let Some(Frame::Code { language, source }) = self.stack.pop() {
                    self.push_block(Node::CodeBlock { language, source });
                }
            }
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {
                if let Some(Frame::Html { html, keep: true }) = self.stack.pop() {
                    self.push_block(Node::Html { html });
                }
            }
            TagEnd::List(_) => {
                if let Some(Frame::List { start, items }) = self.stack.pop() {
                    self.push_block(Node::List {
                        ordered: start.is_some(),
                        start,
                        items,
                    });
                }
            }
            TagEnd::Item => {
                if let Some(nodes) = self.close_blocks()
                    && let Some(Frame::List { items, .. }) = self.stack.last_mut()
                {
                    items.push(nodes);
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {
                for node in self.close_blocks().unwrap_or_default() {
                    self.push_block(node);
                }
            }
            TagEnd::Table => {
                if let Some(Frame::Table { head, rows, .. }) = self.stack.pop() {
                    self.push_block(Node::Table { head, rows });
                }
            }
            TagEnd::TableHead => {
                if let Some(Frame::Table { head, row, .. }) = self.stack.last_mut() {
                    *head = std::mem::take(row);
                }
            }
            TagEnd::TableRow => {
                if let Some(Frame::Table { rows, row, .. }) = self.stack.last_mut() {
                    rows.push(std::mem::take(row));
                }
            }
            TagEnd::TableCell => {
                if let Some(Frame::Leaf { inlines, .. }) = self.stack.pop()
                    && let Some(Frame::Table { row, .. }) = self.stack.last_mut()
                {
                    row.push(inlines);
                }
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image
            | TagEnd::Superscript
            | TagEnd::Subscript => self.close_span(),
        }
    }

    fn text(&mut self, text: &str, range: Range<usize>) {
        match self.stack.last_mut() {
            Some(Frame::Code { source, .. }) => source.push_str(text),
            Some(Frame::Html { html, .. }) => html.push_str(text),
            _ => {
                if let Some(rest) = text.strip_prefix('$')
                    && self.is_escaped(range.start)
                {
                    let split = range.start + 1;
                    self.push_inline(
                        Inline::Escaped {
                            text: "$".to_owned(),
                        },
                        range.start..split,
                    );
                    if !rest.is_empty() {
                        self.push_inline(
                            Inline::Text {
                                text: rest.to_owned(),
                            },
                            split..range.end,
                        );
                    }
                } else {
                    self.push_inline(
                        Inline::Text {
                            text: text.to_owned(),
                        },
                        range,
                    );
                }
            }
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(Frame::Html { html: buffer, .. }) = self.stack.last_mut() {
            buffer.push_str(html);
        } else {
            self.push_block(Node::Html {
                html: html.to_owned(),
            });
        }
    }

    /// Whether the byte before `offset` is a backslash escape.
    fn is_escaped(&self, offset: usize) -> bool {
        offset > 0 && self.markdown.as_bytes().get(offset - 1) == Some(&b'\\')
    }

    fn open_blocks(&mut self, kind: BlockKind) {
        self.close_implicit();
        self.stack.push(Frame::Blocks {
            kind,
            nodes: Vec::new(),
        });
    }

    fn close_blocks(&mut self) -> Option<Vec<Node>> {
        self.close_implicit();
        match self.stack.pop() {
            Some(Frame::Blocks {
                kind: BlockKind::Root,
                nodes,
            }) => {
                // Unbalanced end tag; keep the root in place.
                self.stack.push(Frame::Blocks {
                    kind: BlockKind::Root,
                    nodes,
                });
                None
            }
            Some(Frame::Blocks { nodes, .. }) => Some(nodes),
            _ => None,
        }
    }

    fn open_leaf(&mut self, kind: LeafKind, range: Range<usize>) {
        self.close_implicit();
        self.stack.push(Frame::Leaf {
            kind,
            inlines: Vec::new(),
            range,
        });
    }

    fn close_leaf(&mut self) {
        let Some(Frame::Leaf {
            kind,
            inlines,
            range,
        }) = self.stack.pop()
        else {
            return;
        };
        let node = match kind {
            LeafKind::Heading { level, id } => {
                let text = plain_text(&inlines).trim().to_owned();
                let anchor = id.unwrap_or_else(|| self.slugger.generate(&text));
                Node::Heading {
                    level,
                    text,
                    anchor,
                    inlines,
                }
            }
            LeafKind::Paragraph | LeafKind::Implicit | LeafKind::Cell => {
                self.paragraph(inlines, range)
            }
        };
        self.push_block(node);
    }

    /// Close a paragraph implied by text in a tight list item.
    fn close_implicit(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Leaf {
                kind: LeafKind::Implicit,
                ..
            })
        ) {
            self.close_leaf();
        }
    }

    fn paragraph(&self, inlines: Vec<Inline>, range: Range<usize>) -> Node {
        let source = self
            .markdown
            .get(range)
            .unwrap_or_default()
            .trim()
            .to_owned();
        Node::Paragraph { inlines, source }
    }

    fn open_span(&mut self, kind: SpanKind, range: Range<usize>) {
        self.ensure_leaf(&range);
        self.extend_leaf_range(&range);
        self.stack.push(Frame::Span {
            kind,
            children: Vec::new(),
        });
    }

    fn close_span(&mut self) {
        let Some(Frame::Span { kind, children }) = self.stack.pop() else {
            return;
        };
        match kind {
            SpanKind::Emphasis => self.attach_inline(Inline::Emphasis { children }),
            SpanKind::Strong => self.attach_inline(Inline::Strong { children }),
            SpanKind::Strikethrough => self.attach_inline(Inline::Strikethrough { children }),
            SpanKind::Link { target } => self.attach_inline(Inline::Link { target, children }),
            SpanKind::Image { src } => self.attach_inline(Inline::Image {
                src,
                alt: plain_text(&children),
            }),
            SpanKind::Transparent => {
                for child in children {
                    self.attach_inline(child);
                }
            }
        }
    }

    fn push_block(&mut self, node: Node) {
        self.close_implicit();
        if let Some(Frame::Blocks { nodes, .. }) = self.stack.last_mut() {
            nodes.push(node);
        }
    }

    fn push_inline(&mut self, inline: Inline, range: Range<usize>) {
        self.ensure_leaf(&range);
        self.extend_leaf_range(&range);
        self.attach_inline(inline);
    }

    /// Open an implicit paragraph when inline content lands in a block container.
    fn ensure_leaf(&mut self, range: &Range<usize>) {
        if matches!(self.stack.last(), Some(Frame::Blocks { .. })) {
            self.stack.push(Frame::Leaf {
                kind: LeafKind::Implicit,
                inlines: Vec::new(),
                range: range.clone(),
            });
        }
    }

    fn extend_leaf_range(&mut self, range: &Range<usize>) {
        let leaf = self.stack.iter_mut().rev().find_map(|frame| match frame {
            Frame::Leaf { range, .. } => Some(range),
            _ => None,
        });
        if let Some(leaf) = leaf {
            leaf.start = leaf.start.min(range.start);
            leaf.end = leaf.end.max(range.end);
        }
    }

    fn attach_inline(&mut self, inline: Inline) {
        if let Some(Frame::Leaf { inlines, .. } | Frame::Span {
            children: inlines, ..
        }) = self.stack.last_mut()
        {
            append_inline(inlines, inline);
        }
    }
}

/// Append, merging adjacent text runs.
fn append_inline(target: &mut Vec<Inline>, inline: Inline) {
    if let (Inline::Text { text }, Some(Inline::Text { text: last })) = (&inline, target.last_mut())
    {
        last.push_str(text);
        return;
    }
    target.push(inline);
}

/// Language from a fence info string (`rust title="x"` -> `rust`).
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == '{' || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text { text: s.to_owned() }
    }

    #[test]
    fn test_heading_and_paragraph() {
        let nodes = parse_markdown("# Title\n\nHello *world*.\n");
        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    level: 1,
                    text: "Title".to_owned(),
                    anchor: "title".to_owned(),
                    inlines: vec![text("Title")],
                },
                Node::Paragraph {
                    inlines: vec![
                        text("Hello "),
                        Inline::Emphasis {
                            children: vec![text("world")]
                        },
                        text("."),
                    ],
                    source: "Hello *world*.".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_heading_anchors_deduplicated() {
        let nodes = parse_markdown("## Custom {#usage}\n\n## Usage\n\n## Usage\n");
        let anchors: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Heading { anchor, .. } => Some(anchor.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(anchors, vec!["usage", "usage-1", "usage-2"]);
    }

    #[test]
    fn test_fenced_code_language() {
        let nodes = parse_markdown("```rust title=\"main.rs\"\nfn main() {}\n```\n\n    indented\n");
        assert_eq!(
            nodes,
            vec![
                Node::CodeBlock {
                    language: Some("rust".to_owned()),
                    source: "fn main() {}\n".to_owned(),
                },
                Node::CodeBlock {
                    language: None,
                    source: "indented\n".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let nodes = parse_markdown("- one\n- [two](two.md)\n");
        let Node::List { ordered, items, .. } = &nodes[0] else {
            panic!("expected list, got {nodes:?}");
        };
        assert!(!ordered);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            vec![Node::Paragraph {
                inlines: vec![text("one")],
                source: "one".to_owned(),
            }]
        );
        assert!(matches!(
            &items[1][0],
            Node::Paragraph { inlines, .. } if matches!(&inlines[0], Inline::Link { target, .. } if target == "two.md")
        ));
    }

    #[test]
    fn test_nested_list_and_quote() {
        let nodes = parse_markdown("> 1. first\n>    - inner\n");
        let Node::BlockQuote { children } = &nodes[0] else {
            panic!("expected quote");
        };
        let Node::List { ordered, start, items } = &children[0] else {
            panic!("expected list");
        };
        assert!(ordered);
        assert_eq!(*start, Some(1));
        assert!(matches!(items[0][1], Node::List { ordered: false, .. }));
    }

    #[test]
    fn test_table() {
        let nodes = parse_markdown("| A | B |\n|---|---|\n| 1 | `2` |\n");
        assert_eq!(
            nodes,
            vec![Node::Table {
                head: vec![vec![text("A")], vec![text("B")]],
                rows: vec![vec![
                    vec![text("1")],
                    vec![Inline::Code {
                        code: "2".to_owned()
                    }]
                ]],
            }]
        );
    }

    fn dollar(source: &str, display: bool) -> Inline {
        Inline::DollarSpan {
            source: source.to_owned(),
            display,
        }
    }

    #[test]
    fn test_dollar_span_wins_over_emphasis() {
        let nodes = parse_markdown("Cost $a_b$ and $a*b*c$ here\n");
        let Node::Paragraph { inlines, .. } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inlines,
            &vec![
                text("Cost "),
                dollar("a_b", false),
                text(" and "),
                dollar("a*b*c", false),
                text(" here"),
            ]
        );
        assert_eq!(plain_text(inlines), "Cost $a_b$ and $a*b*c$ here");
    }

    #[test]
    fn test_display_dollar_span_in_quote_drops_markers() {
        let nodes = parse_markdown("> $$\n> x^2\n> $$\n");
        let Node::BlockQuote { children } = &nodes[0] else {
            panic!("expected block quote");
        };
        let Node::Paragraph { inlines, .. } = &children[0] else {
            panic!("expected paragraph");
        };
        assert!(
            matches!(&inlines[..], [Inline::DollarSpan { source, display: true }] if source.trim() == "x^2"),
            "{inlines:?}"
        );
    }

    #[test]
    fn test_currency_is_text() {
        let nodes = parse_markdown("costs $5 and $ 10 today\n");
        let Node::Paragraph { inlines, .. } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inlines, &vec![text("costs $5 and $ 10 today")]);
    }

    #[test]
    fn test_escaped_dollar_marked() {
        let nodes = parse_markdown(r"Price \$5");
        let Node::Paragraph { inlines, .. } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inlines,
            &vec![
                text("Price "),
                Inline::Escaped {
                    text: "$".to_owned()
                },
                text("5"),
            ]
        );
    }

    #[test]
    fn test_image_alt_text() {
        let nodes = parse_markdown("![A *cat*](cat.png)\n");
        let Node::Paragraph { inlines, .. } = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inlines,
            &vec![Inline::Image {
                src: "cat.png".to_owned(),
                alt: "A cat".to_owned(),
            }]
        );
    }

    #[test]
    fn test_html_block_and_rule() {
        let nodes = parse_markdown("<div>\nhi\n</div>\n\n---\n");
        assert_eq!(
            nodes,
            vec![
                Node::Html {
                    html: "<div>\nhi\n</div>\n".to_owned()
                },
                Node::Rule,
            ]
        );
    }

    #[test]
    fn test_walk_inlines_finds_nested_links() {
        let nodes = parse_markdown("- **see [a](a.md)**\n\n| [b](/b) |\n|---|\n");
        let mut targets = Vec::new();
        walk_inlines(&nodes, &mut |inline| {
            if let Inline::Link { target, .. } = inline {
                targets.push(target.as_str());
            }
        });
        assert_eq!(targets, vec!["a.md", "/b"]);
    }

    #[test]
    fn test_word_count() {
        let nodes = parse_markdown("# Two words\n\nthree more words\n\n```\ncode here\n```\n");
        assert_eq!(word_count(&nodes), 7);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(Node::Rule).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "rule" }));
    }
}
