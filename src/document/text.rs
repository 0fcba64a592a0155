// src/document/text.rs
// =============================================================================
// Renders a document tree as plain text for the terminal.
//
// Blocks (headings, paragraphs, lists, tables, ...) are separated by a blank
// line. Inline markup is dropped; links keep their target in parentheses and
// images show up as `[image: alt]`.
// =============================================================================

use super::{ElementKind, Node};

pub fn to_text(nodes: &[Node]) -> String {
    let mut blocks = Vec::new();
    collect_blocks(nodes, &mut blocks);
    blocks.join("\n\n")
}

// Splits `nodes` into blocks. Runs of inline nodes between blocks become a
// block of their own (raw HTML containers often hold bare text).
fn collect_blocks(nodes: &[Node], out: &mut Vec<String>) {
    let mut inline = String::new();
    for node in nodes {
        if is_block(node) {
            flush_inline(&mut inline, out);
            write_block(node, out);
        } else {
            write_inline(&mut inline, node);
        }
    }
    flush_inline(&mut inline, out);
}

fn flush_inline(inline: &mut String, out: &mut Vec<String>) {
    let text = inline.trim();
    if !text.is_empty() {
        out.push(text.to_string());
    }
    inline.clear();
}

fn is_block(node: &Node) -> bool {
    match node {
        Node::Rule => true,
        Node::Element { kind, .. } => matches!(
            kind,
            ElementKind::Heading(_)
                | ElementKind::Paragraph
                | ElementKind::BlockQuote
                | ElementKind::CodeBlock { .. }
                | ElementKind::List { .. }
                | ElementKind::Table
                | ElementKind::FootnoteDefinition(_)
                | ElementKind::Container
        ),
        _ => false,
    }
}

fn write_block(node: &Node, out: &mut Vec<String>) {
    let (kind, children) = match node {
        Node::Rule => {
            out.push("---".to_string());
            return;
        }
        Node::Element { kind, children } => (kind, children),
        _ => return,
    };

    match kind {
        ElementKind::Heading(level) => {
            out.push(format!("{} {}", "#".repeat(*level as usize), inline_text(children).trim()));
        }
        ElementKind::CodeBlock { .. } => {
            let code = inline_text(children);
            let indented: Vec<String> = code
                .trim_end_matches('\n')
                .lines()
                .map(|line| format!("    {}", line))
                .collect();
            out.push(indented.join("\n"));
        }
        ElementKind::BlockQuote => {
            let inner = nested(children);
            if !inner.is_empty() {
                out.push(prefix_lines(&inner, "> ", "> "));
            }
        }
        ElementKind::FootnoteDefinition(label) => {
            out.push(format!("[^{}]: {}", label, nested(children)));
        }
        ElementKind::List { start } => {
            let items: Vec<String> = children
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let marker = match start {
                        Some(n) => format!("{}. ", n + i as u64),
                        None => "- ".to_string(),
                    };
                    let body = match item {
                        Node::Element { children, .. } => nested(children),
                        other => inline_text(std::slice::from_ref(other)),
                    };
                    let indent = " ".repeat(marker.chars().count());
                    prefix_lines(&body, &marker, &indent)
                })
                .collect();
            out.push(items.join("\n"));
        }
        ElementKind::Table => {
            let rows: Vec<String> = children.iter().filter_map(table_row).collect();
            out.push(rows.join("\n"));
        }
        ElementKind::Container => collect_blocks(children, out),
        _ => {
            let text = inline_text(children);
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
    }
}

// Blocks inside a list item or quote, kept tight (single newlines)
fn nested(children: &[Node]) -> String {
    let mut blocks = Vec::new();
    collect_blocks(children, &mut blocks);
    blocks.join("\n")
}

fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| format!("{}{}", if i == 0 { first } else { rest }, line))
        .collect::<Vec<_>>()
        .join("\n")
}

// The head holds its cells directly, body rows wrap them in TableRow
fn table_row(node: &Node) -> Option<String> {
    match node {
        Node::Element {
            kind: ElementKind::TableHead | ElementKind::TableRow,
            children,
        } => Some(
            children
                .iter()
                .map(|cell| inline_text(std::slice::from_ref(cell)).trim().to_string())
                .collect::<Vec<_>>()
                .join(" | "),
        ),
        _ => None,
    }
}

fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_inline(&mut out, node);
    }
    out
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Code(code) => {
            out.push('`');
            out.push_str(code);
            out.push('`');
        }
        Node::Image(image) if image.alt.is_empty() => out.push_str("[image]"),
        Node::Image(image) => out.push_str(&format!("[image: {}]", image.alt)),
        Node::FootnoteReference(label) => out.push_str(&format!("[^{}]", label)),
        Node::TaskMarker(true) => out.push_str("[x] "),
        Node::TaskMarker(false) => out.push_str("[ ] "),
        Node::SoftBreak => out.push(' '),
        Node::HardBreak => out.push('\n'),
        Node::Rule => {}
        Node::Element {
            kind: ElementKind::Link { href, .. },
            children,
        } => {
            let label = inline_text(children);
            if label.trim().is_empty() || label == *href {
                out.push_str(href);
            } else {
                out.push_str(&format!("{} ({})", label, href));
            }
        }
        Node::Element { children, .. } => out.push_str(&inline_text(children)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Image;

    fn element(kind: ElementKind, children: Vec<Node>) -> Node {
        Node::Element { kind, children }
    }

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    #[test]
    fn test_blocks_are_separated() {
        let nodes = vec![
            element(ElementKind::Heading(2), vec![text("Install")]),
            element(
                ElementKind::Paragraph,
                vec![
                    text("Run "),
                    Node::Code("cargo build".into()),
                    text(" or see "),
                    element(
                        ElementKind::Link {
                            href: "https://x.io".into(),
                            title: None,
                        },
                        vec![text("docs")],
                    ),
                ],
            ),
            Node::Rule,
        ];
        assert_eq!(
            to_text(&nodes),
            "## Install\n\nRun `cargo build` or see docs (https://x.io)\n\n---"
        );
    }

    #[test]
    fn test_lists_and_code() {
        let item = |value: &str| element(ElementKind::ListItem, vec![text(value)]);
        let nodes = vec![
            element(ElementKind::List { start: Some(3) }, vec![item("three"), item("four")]),
            element(ElementKind::List { start: None }, vec![item("dot")]),
            element(
                ElementKind::CodeBlock { language: None },
                vec![text("fn main() {}\nlet x = 1;\n")],
            ),
        ];
        assert_eq!(
            to_text(&nodes),
            "3. three\n4. four\n\n- dot\n\n    fn main() {}\n    let x = 1;"
        );
    }

    #[test]
    fn test_images_and_markup_free_output() {
        let nodes = vec![element(
            ElementKind::Container,
            vec![
                Node::Image(Image {
                    src: "a.png".into(),
                    alt: "demo".into(),
                    ..Image::default()
                }),
                element(ElementKind::Strong, vec![text(" <b>not html</b>")]),
            ],
        )];
        let rendered = to_text(&nodes);
        assert_eq!(rendered, "[image: demo] <b>not html</b>");
        assert!(!rendered.contains("<img"));
    }

    #[test]
    fn test_table_rows() {
        let cell = |value: &str| element(ElementKind::TableCell, vec![text(value)]);
        let nodes = vec![element(
            ElementKind::Table,
            vec![
                element(ElementKind::TableHead, vec![cell("Name"), cell("Value")]),
                element(ElementKind::TableRow, vec![cell("a"), cell("1")]),
            ],
        )];
        assert_eq!(to_text(&nodes), "Name | Value\na | 1");
    }
}
