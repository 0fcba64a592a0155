// src/document/mod.rs
// =============================================================================
// The document tree: a typed representation of a rendered README.
//
// Instead of gluing HTML strings together, the renderer builds a tree of
// `Node`s. That makes two things easy:
// - walking every image in document order (link rewriting, thumbnails)
// - producing HTML at the very end with every attribute and text escaped
//
// Submodules:
// - html: serializes a tree into an HTML fragment
// - text: plain-text rendering for the terminal
//
// Rust concepts:
// - Recursive enums: a Node can contain more Nodes
// - Closures taking &mut: visiting and editing nodes in place
// =============================================================================

mod html;
mod text;

pub use html::{escape_attr, escape_text, to_html};

/// One node of the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A container element (paragraph, list, link, ...)
    Element { kind: ElementKind, children: Vec<Node> },
    /// Plain text
    Text(String),
    /// Inline code span
    Code(String),
    Image(Image),
    /// Reference to a footnote definition, by label
    FootnoteReference(String),
    /// GFM task list checkbox
    TaskMarker(bool),
    SoftBreak,
    HardBreak,
    Rule,
}

/// What kind of container an `Element` is
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    BlockQuote,
    CodeBlock { language: Option<String> },
    List { start: Option<u64> },
    ListItem,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: Option<String> },
    FootnoteDefinition(String),
    /// Generic block coming from raw HTML (`<div>`, `<p align=...>`, ...)
    Container,
}

/// An image node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: Option<String>,
    /// Element identifier, assigned by the link rewriter
    pub id: Option<String>,
}

/// A whole rendered README
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentTree {
    pub nodes: Vec<Node>,
}

impl DocumentTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    // Calls `visit` on every image, in document order (depth-first, pre-order)
    pub fn for_each_image_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Image),
    {
        fn walk<F: FnMut(&mut Image)>(nodes: &mut [Node], visit: &mut F) {
            for node in nodes {
                match node {
                    Node::Image(image) => visit(image),
                    Node::Element { children, .. } => walk(children, visit),
                    _ => {}
                }
            }
        }
        walk(&mut self.nodes, &mut visit);
    }

    // Read-only list of images, in document order
    pub fn images(&self) -> Vec<&Image> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Image>) {
            for node in nodes {
                match node {
                    Node::Image(image) => out.push(image),
                    Node::Element { children, .. } => walk(children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    /// Looks up an image node by its assigned identifier
    pub fn find_image(&self, id: &str) -> Option<&Image> {
        self.images()
            .into_iter()
            .find(|image| image.id.as_deref() == Some(id))
    }

    pub fn to_html(&self) -> String {
        to_html(&self.nodes)
    }

    pub fn to_text(&self) -> String {
        text::to_text(&self.nodes)
    }
}

// Concatenates all text below a list of nodes (used for image alt text)
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) | Node::Code(text) => out.push_str(text),
            Node::Element { children, .. } => out.push_str(&plain_text(children)),
            Node::Image(image) => out.push_str(&image.alt),
            Node::SoftBreak | Node::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out
}
