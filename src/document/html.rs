// src/document/html.rs
// =============================================================================
// Serializes a document tree into an HTML fragment.
//
// Every text node and attribute value goes through an escaping function, so
// nothing a README author writes can inject markup. Link targets using a
// script-capable scheme are neutralized.
// =============================================================================

use super::{ElementKind, Image, Node};

// Renders a list of nodes as HTML
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(&mut out, nodes, false);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], in_head: bool) {
    for node in nodes {
        write_node(out, node, in_head);
    }
}

fn write_node(out: &mut String, node: &Node, in_head: bool) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Code(code) => {
            out.push_str("<code>");
            out.push_str(&escape_text(code));
            out.push_str("</code>");
        }
        Node::Image(image) => write_image(out, image),
        Node::FootnoteReference(label) => {
            let label = escape_attr(label);
            out.push_str(&format!(
                "<sup class=\"footnote-reference\"><a href=\"#fn-{0}\">{0}</a></sup>",
                label
            ));
        }
        Node::TaskMarker(checked) => {
            if *checked {
                out.push_str("<input type=\"checkbox\" disabled checked> ");
            } else {
                out.push_str("<input type=\"checkbox\" disabled> ");
            }
        }
        Node::SoftBreak => out.push('\n'),
        Node::HardBreak => out.push_str("<br>\n"),
        Node::Rule => out.push_str("<hr>\n"),
        Node::Element { kind, children } => write_element(out, kind, children, in_head),
    }
}

fn write_element(out: &mut String, kind: &ElementKind, children: &[Node], in_head: bool) {
    match kind {
        ElementKind::Heading(level) => {
            out.push_str(&format!("<h{}>", level));
            write_nodes(out, children, in_head);
            out.push_str(&format!("</h{}>\n", level));
        }
        ElementKind::CodeBlock { language } => {
            match language {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    escape_attr(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            write_nodes(out, children, in_head);
            out.push_str("</code></pre>\n");
        }
        ElementKind::List { start } => {
            let (open, close) = match start {
                Some(1) => ("<ol>".to_string(), "</ol>\n"),
                Some(n) => (format!("<ol start=\"{}\">", n), "</ol>\n"),
                None => ("<ul>".to_string(), "</ul>\n"),
            };
            out.push_str(&open);
            out.push('\n');
            write_nodes(out, children, in_head);
            out.push_str(close);
        }
        ElementKind::TableHead => {
            // pulldown-cmark puts header cells directly under the head
            out.push_str("<thead><tr>");
            write_nodes(out, children, true);
            out.push_str("</tr></thead><tbody>\n");
        }
        ElementKind::Table => {
            out.push_str("<table>");
            write_nodes(out, children, false);
            out.push_str("</tbody></table>\n");
        }
        ElementKind::TableCell => {
            let tag = if in_head { "th" } else { "td" };
            out.push_str(&format!("<{}>", tag));
            write_nodes(out, children, in_head);
            out.push_str(&format!("</{}>", tag));
        }
        ElementKind::Link { href, title } => {
            out.push_str(&format!("<a href=\"{}\"", escape_attr(safe_href(href))));
            if let Some(title) = title {
                out.push_str(&format!(" title=\"{}\"", escape_attr(title)));
            }
            out.push('>');
            write_nodes(out, children, in_head);
            out.push_str("</a>");
        }
        ElementKind::FootnoteDefinition(label) => {
            out.push_str(&format!(
                "<div class=\"footnote-definition\" id=\"fn-{}\">",
                escape_attr(label)
            ));
            write_nodes(out, children, in_head);
            out.push_str("</div>\n");
        }
        simple => {
            let (tag, block) = simple_tag(simple);
            out.push_str(&format!("<{}>", tag));
            write_nodes(out, children, in_head);
            out.push_str(&format!("</{}>", tag));
            if block {
                out.push('\n');
            }
        }
    }
}

// Tag name and whether a newline follows, for elements without attributes
fn simple_tag(kind: &ElementKind) -> (&'static str, bool) {
    match kind {
        ElementKind::Paragraph => ("p", true),
        ElementKind::BlockQuote => ("blockquote", true),
        ElementKind::ListItem => ("li", true),
        ElementKind::TableRow => ("tr", true),
        ElementKind::Emphasis => ("em", false),
        ElementKind::Strong => ("strong", false),
        ElementKind::Strikethrough => ("del", false),
        _ => ("div", true),
    }
}

fn write_image(out: &mut String, image: &Image) {
    out.push_str("<img");
    if let Some(id) = &image.id {
        out.push_str(&format!(" id=\"{}\"", escape_attr(id)));
    }
    out.push_str(&format!(
        " src=\"{}\" alt=\"{}\"",
        escape_attr(safe_href(&image.src)),
        escape_attr(&image.alt)
    ));
    if let Some(title) = &image.title {
        out.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    out.push('>');
}

// Replaces script-capable URLs with a harmless fragment link
fn safe_href(href: &str) -> &str {
    let lowered = href.trim_start().to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("vbscript:") {
        "#"
    } else {
        href
    }
}

/// Escapes text content
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a double-quoted attribute value
pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let nodes = vec![Node::Element {
            kind: ElementKind::Paragraph,
            children: vec![Node::Text("<script>alert(1)</script> & more".into())],
        }];
        assert_eq!(
            to_html(&nodes),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</p>\n"
        );
    }

    #[test]
    fn test_image_attributes() {
        let nodes = vec![Node::Image(Image {
            src: "https://example.com/a.png?x=1&y=\"2\"".into(),
            alt: "demo".into(),
            title: None,
            id: Some("readme-image-foo-0".into()),
        })];
        assert_eq!(
            to_html(&nodes),
            "<img id=\"readme-image-foo-0\" src=\"https://example.com/a.png?x=1&amp;y=&quot;2&quot;\" alt=\"demo\">"
        );
    }

    #[test]
    fn test_javascript_links_are_neutralized() {
        let nodes = vec![Node::Element {
            kind: ElementKind::Link {
                href: "JavaScript:alert(1)".into(),
                title: None,
            },
            children: vec![Node::Text("click".into())],
        }];
        assert_eq!(to_html(&nodes), "<a href=\"#\">click</a>");
    }

    #[test]
    fn test_ordered_list_with_start() {
        let nodes = vec![Node::Element {
            kind: ElementKind::List { start: Some(3) },
            children: vec![Node::Element {
                kind: ElementKind::ListItem,
                children: vec![Node::Text("three".into())],
            }],
        }];
        assert_eq!(to_html(&nodes), "<ol start=\"3\">\n<li>three</li>\n</ol>\n");
    }
}
