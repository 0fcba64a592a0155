// src/readme/render.rs
// =============================================================================
// The Renderer stage: markdown text -> DocumentTree.
//
// We use `pulldown-cmark`, which produces a flat stream of events:
//   Start(Paragraph), Text("hi"), End(Paragraph), ...
// A stack turns that stream back into a tree: Start pushes a frame, End pops
// it and attaches the finished node to its parent.
//
// READMEs often embed raw HTML (centered logos, badges, <img width=...>).
// Consecutive HTML events are collected and parsed with `scraper`, then
// converted into the same typed nodes. Unknown tags are unwrapped and
// scripts/styles are dropped, so no raw markup survives.
// =============================================================================

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use scraper::{ElementRef, Html, Node as HtmlNode};

use crate::document::{plain_text, DocumentTree, ElementKind, Image, Node};

// Converts markdown into a document tree. This never fails: CommonMark
// defines a rendering for every input.
pub fn render_markdown(markdown: &str) -> DocumentTree {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = TreeBuilder::default();

    for event in Parser::new_ext(markdown, options) {
        if let Event::Html(html) = event {
            builder.pending_html.push_str(&html);
            continue;
        }
        builder.flush_html();

        match event {
            Event::Start(tag) => builder.open(frame_for(tag)),
            Event::End(_) => builder.close(),
            Event::Text(text) => builder.push(Node::Text(text.to_string())),
            Event::Code(code) => builder.push(Node::Code(code.to_string())),
            Event::FootnoteReference(label) => {
                builder.push(Node::FootnoteReference(label.to_string()))
            }
            Event::SoftBreak => builder.push(Node::SoftBreak),
            Event::HardBreak => builder.push(Node::HardBreak),
            Event::Rule => builder.push(Node::Rule),
            Event::TaskListMarker(checked) => builder.push(Node::TaskMarker(checked)),
            Event::Html(_) => unreachable!("html events are buffered above"),
        }
    }

    builder.finish()
}

// An open container while building
enum Frame {
    Element(ElementKind),
    Image { src: String, title: Option<String> },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<(Frame, Vec<Node>)>,
    root: Vec<Node>,
    pending_html: String,
}

impl TreeBuilder {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: Node) {
        self.current().push(node);
    }

    fn open(&mut self, frame: Frame) {
        self.stack.push((frame, Vec::new()));
    }

    fn close(&mut self) {
        if let Some((frame, children)) = self.stack.pop() {
            let node = match frame {
                Frame::Element(kind) => Node::Element { kind, children },
                // Everything between Start(Image) and End(Image) is alt text
                Frame::Image { src, title } => Node::Image(Image {
                    src,
                    alt: plain_text(&children),
                    title,
                    id: None,
                }),
            };
            self.push(node);
        }
    }

    fn flush_html(&mut self) {
        if self.pending_html.is_empty() {
            return;
        }
        let html = std::mem::take(&mut self.pending_html);
        let nodes = html_to_nodes(&html);
        self.current().extend(nodes);
    }

    fn finish(mut self) -> DocumentTree {
        self.flush_html();
        // Well-formed event streams leave nothing open, but never lose content
        while !self.stack.is_empty() {
            self.close();
        }
        DocumentTree::new(self.root)
    }
}

fn frame_for(tag: Tag<'_>) -> Frame {
    let kind = match tag {
        Tag::Paragraph => ElementKind::Paragraph,
        Tag::Heading(level, _, _) => ElementKind::Heading(heading_level(level)),
        Tag::BlockQuote => ElementKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(lang)) if !lang.is_empty() => ElementKind::CodeBlock {
            language: Some(lang.to_string()),
        },
        Tag::CodeBlock(_) => ElementKind::CodeBlock { language: None },
        Tag::List(start) => ElementKind::List { start },
        Tag::Item => ElementKind::ListItem,
        Tag::FootnoteDefinition(label) => ElementKind::FootnoteDefinition(label.to_string()),
        Tag::Table(_) => ElementKind::Table,
        Tag::TableHead => ElementKind::TableHead,
        Tag::TableRow => ElementKind::TableRow,
        Tag::TableCell => ElementKind::TableCell,
        Tag::Emphasis => ElementKind::Emphasis,
        Tag::Strong => ElementKind::Strong,
        Tag::Strikethrough => ElementKind::Strikethrough,
        Tag::Link(_, href, title) => ElementKind::Link {
            href: href.to_string(),
            title: non_empty(title.to_string()),
        },
        Tag::Image(_, src, title) => {
            return Frame::Image {
                src: src.to_string(),
                title: non_empty(title.to_string()),
            }
        }
    };
    Frame::Element(kind)
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// Parses an HTML snippet and converts it to typed nodes
fn html_to_nodes(html: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(html);
    let mut out = Vec::new();
    convert_children(fragment.root_element(), &mut out);
    out
}

fn convert_children(parent: ElementRef<'_>, out: &mut Vec<Node>) {
    for child in parent.children() {
        match child.value() {
            HtmlNode::Text(text) => {
                let text: &str = text;
                if !text.trim().is_empty() {
                    out.push(Node::Text(text.to_string()));
                }
            }
            HtmlNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    convert_element(element, out);
                }
            }
            // comments, doctypes, processing instructions
            _ => {}
        }
    }
}

fn convert_element(element: ElementRef<'_>, out: &mut Vec<Node>) {
    let attr = |name: &str| element.value().attr(name).map(str::to_string);

    let kind = match element.value().name() {
        "img" => {
            out.push(Node::Image(Image {
                src: attr("src").unwrap_or_default(),
                alt: attr("alt").unwrap_or_default(),
                title: attr("title"),
                id: None,
            }));
            return;
        }
        "br" => {
            out.push(Node::HardBreak);
            return;
        }
        "hr" => {
            out.push(Node::Rule);
            return;
        }
        "code" => {
            out.push(Node::Code(element.text().collect()));
            return;
        }
        "script" | "style" | "noscript" | "iframe" | "object" | "embed" | "template" => return,
        "a" => match attr("href") {
            Some(href) => ElementKind::Link {
                href,
                title: attr("title"),
            },
            None => {
                convert_children(element, out);
                return;
            }
        },
        "h1" => ElementKind::Heading(1),
        "h2" => ElementKind::Heading(2),
        "h3" => ElementKind::Heading(3),
        "h4" => ElementKind::Heading(4),
        "h5" => ElementKind::Heading(5),
        "h6" => ElementKind::Heading(6),
        "strong" | "b" => ElementKind::Strong,
        "em" | "i" => ElementKind::Emphasis,
        "del" | "s" => ElementKind::Strikethrough,
        "ul" => ElementKind::List { start: None },
        "ol" => ElementKind::List { start: Some(1) },
        "li" => ElementKind::ListItem,
        "blockquote" => ElementKind::BlockQuote,
        "p" | "div" | "center" | "section" | "details" | "summary" | "figure" | "picture" => {
            ElementKind::Container
        }
        // Anything else: keep the content, drop the tag
        _ => {
            convert_children(element, out);
            return;
        }
    };

    let mut children = Vec::new();
    convert_children(element, &mut children);
    out.push(Node::Element { kind, children });
}
