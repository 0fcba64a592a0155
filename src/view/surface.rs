// src/view/surface.rs
// =============================================================================
// Surfaces: where the README viewer draws.
//
// A surface is the presentation target of the viewer: a title and a body
// region, plus the ability to scroll an element into view. The controller
// only talks to the `Surface` trait, so the same logic drives:
// - TerminalSurface: prints to stdout
// - HtmlPageSurface: builds a standalone HTML page
// =============================================================================

use tracing::debug;

use super::ReadmeView;
use crate::document::{escape_attr, escape_text};

/// How an element should be scrolled into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub smooth: bool,
    pub centered: bool,
}

impl ScrollOptions {
    /// What a thumbnail click asks for
    pub const SMOOTH_CENTER: ScrollOptions = ScrollOptions {
        smooth: true,
        centered: true,
    };
}

pub trait Surface {
    fn set_title(&mut self, title: &str);
    fn show_loading(&mut self, message: &str);
    fn show_readme(&mut self, view: &ReadmeView);
    fn show_error(&mut self, message: &str);
    fn clear(&mut self);
    fn scroll_into_view(&mut self, element_id: &str, options: ScrollOptions);
}

// Body HTML for a loaded README: thumbnail strip (if any) above the document.
// Thumbnails carry the id of their image in `data-target`; the page script
// does the scrolling.
pub fn render_view_html(view: &ReadmeView) -> String {
    let mut out = String::new();

    if let Some(strip) = &view.thumbnails {
        out.push_str("<div class=\"readme-thumbnails\">\n");
        for thumb in &strip.thumbnails {
            out.push_str(&format!(
                "  <img class=\"readme-thumbnail\" src=\"{}\" title=\"{}\" alt=\"\" data-target=\"{}\">\n",
                escape_attr(&thumb.src),
                escape_attr(&thumb.title),
                escape_attr(&thumb.target_id),
            ));
        }
        out.push_str("</div>\n");
    }

    out.push_str("<div class=\"readme-body\">\n");
    out.push_str(&view.readme.document.to_html());
    out.push_str("</div>\n");
    out
}

// Plain-text version of a loaded README for the terminal
pub fn render_view_text(view: &ReadmeView) -> String {
    let mut out = String::new();
    if let Some(strip) = &view.thumbnails {
        out.push_str(&format!("🖼️  {} image(s):\n", strip.thumbnails.len()));
        for thumb in &strip.thumbnails {
            out.push_str(&format!("   [{}] #{} {}\n", thumb.index, thumb.target_id, thumb.src));
        }
        out.push('\n');
    }
    out.push_str(&view.readme.document.to_text());
    out
}

// `element.scrollIntoView(...)` with the given options, as JavaScript
fn scroll_call(element: &str, options: ScrollOptions) -> String {
    format!(
        "{}.scrollIntoView({{ behavior: '{}', block: '{}' }})",
        element,
        if options.smooth { "smooth" } else { "auto" },
        if options.centered { "center" } else { "start" },
    )
}

// One click handler for every thumbnail. A thumbnail whose image is gone
// does nothing.
fn thumbnail_script() -> String {
    format!(
        "<script>document.addEventListener('click', (event) => {{ \
         const thumb = event.target.closest('.readme-thumbnail[data-target]'); \
         if (!thumb) {{ return; }} \
         const el = document.getElementById(thumb.dataset.target); \
         if (el) {{ {}; }} }});</script>\n",
        scroll_call("el", ScrollOptions::SMOOTH_CENTER)
    )
}

const PAGE_STYLE: &str = "<style>\n\
body { font-family: system-ui, sans-serif; max-width: 56rem; margin: 0 auto; padding: 1.5rem; }\n\
.readme-thumbnails { display: flex; gap: 0.5rem; overflow-x: auto; padding-bottom: 1rem; }\n\
.readme-thumbnail { width: 4rem; height: 4rem; flex: none; object-fit: cover; border-radius: 0.375rem; cursor: pointer; }\n\
.readme-body img { max-width: 100%; }\n\
.readme-error { color: #b91c1c; }\n\
</style>\n";

// -----------------------------------------------------------------------------
// Terminal
// -----------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TerminalSurface;

impl Surface for TerminalSurface {
    fn set_title(&mut self, title: &str) {
        println!("📘 {}", title);
    }

    fn show_loading(&mut self, message: &str) {
        println!("⏳ {}", message);
    }

    fn show_readme(&mut self, view: &ReadmeView) {
        println!("{}", render_view_text(view));
    }

    fn show_error(&mut self, message: &str) {
        println!("❌ {}", message);
    }

    fn clear(&mut self) {
        debug!("terminal surface cleared");
    }

    fn scroll_into_view(&mut self, element_id: &str, _options: ScrollOptions) {
        println!("↪  Scrolled to #{}", element_id);
    }
}

// -----------------------------------------------------------------------------
// Standalone HTML page
// -----------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct HtmlPageSurface {
    title: String,
    body: String,
    focus: Option<(String, ScrollOptions)>,
}

impl HtmlPageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    // The complete page. A pending scroll request becomes a small script
    // that runs once the page has loaded; thumbnail clicks are handled by a
    // second one.
    pub fn to_page(&self) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        page.push_str(PAGE_STYLE);
        page.push_str("</head>\n<body>\n");
        page.push_str(&format!("<h1 id=\"modal-title\">{}</h1>\n", escape_text(&self.title)));
        page.push_str("<div id=\"modal-body\">\n");
        page.push_str(&self.body);
        page.push_str("</div>\n");
        page.push_str(&thumbnail_script());

        if let Some((id, options)) = &self.focus {
            // JSON string literals are valid JS; also keep "</" out of the script
            let id_literal = serde_json::to_string(id)
                .unwrap_or_else(|_| "\"\"".to_string())
                .replace("</", "<\\/");
            page.push_str(&format!(
                "<script>window.addEventListener('load', () => {{ const el = document.getElementById({}); if (el) {{ {}; }} }});</script>\n",
                id_literal,
                scroll_call("el", *options),
            ));
        }

        page.push_str("</body>\n</html>\n");
        page
    }
}

impl Surface for HtmlPageSurface {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_loading(&mut self, message: &str) {
        self.body = format!(
            "<div class=\"readme-loading\"><p>{}</p></div>\n",
            escape_text(message)
        );
    }

    fn show_readme(&mut self, view: &ReadmeView) {
        self.body = render_view_html(view);
    }

    fn show_error(&mut self, message: &str) {
        self.body = format!(
            "<div class=\"readme-error\"><p>{}</p></div>\n",
            escape_text(message)
        );
    }

    fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
        self.focus = None;
    }

    fn scroll_into_view(&mut self, element_id: &str, options: ScrollOptions) {
        self.focus = Some((element_id.to_string(), options));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{ReadmePayload, ReadmeRequest};
    use crate::readme;
    use crate::view::ThumbnailStrip;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    fn view_of(markdown: &str) -> ReadmeView {
        let payload = ReadmePayload {
            content: Some(STANDARD.encode(markdown)),
            encoding: None,
        };
        let readme = readme::process(
            payload,
            &ReadmeRequest::new("bar", "foo"),
            "https://raw.githubusercontent.com",
            |_| {},
        )
        .unwrap();
        ReadmeView {
            thumbnails: ThumbnailStrip::from_images(&readme.images),
            readme,
        }
    }

    #[test]
    fn test_error_replaces_loading() {
        let mut surface = HtmlPageSurface::new();
        surface.set_title("foo - README.md");
        surface.show_loading("Loading README...");
        surface.show_error("README.md not found in this repository.");

        let page = surface.to_page();
        assert!(page.contains("<h1 id=\"modal-title\">foo - README.md</h1>"));
        assert!(page.contains("README.md not found in this repository."));
        assert!(!page.contains("Loading README..."));
        assert!(!page.contains("addEventListener('load'"));
    }

    #[test]
    fn test_thumbnail_clicks_scroll_smoothly_to_center() {
        let mut surface = HtmlPageSurface::new();
        surface.show_readme(&view_of("![a](a.png)\n\n![b](b.png)\n\n![c](c.png)\n"));

        let page = surface.to_page();
        assert!(page.contains(
            "<img class=\"readme-thumbnail\" src=\"https://raw.githubusercontent.com/bar/foo/main/b.png\" \
             title=\"Click to scroll to image\" alt=\"\" data-target=\"readme-image-foo-1\">"
        ));
        assert!(!page.contains("href=\"#readme-image-foo-1\""));

        assert!(page.contains("document.addEventListener('click'"));
        assert!(page.contains("document.getElementById(thumb.dataset.target)"));
        assert!(page.contains("if (el) { el.scrollIntoView({ behavior: 'smooth', block: 'center' }); }"));
        assert!(page.contains(".readme-thumbnail { width: 4rem; height: 4rem;"));
        assert!(page.contains("object-fit: cover"));
    }

    #[test]
    fn test_terminal_text_has_no_markup() {
        let text = render_view_text(&view_of("# Title\n\nSome *text* & more\n\n![logo](logo.png)\n"));

        assert!(text.starts_with("🖼️  1 image(s):\n   [0] #readme-image-foo-0 "));
        assert!(text.contains("# Title\n\nSome text & more\n\n[image: logo]"));
        assert!(!text.contains("<p>"));
        assert!(!text.contains("&amp;"));
    }

    #[test]
    fn test_focus_script_escapes_identifier() {
        let mut surface = HtmlPageSurface::new();
        surface.scroll_into_view("readme-image-</script>-0", ScrollOptions::SMOOTH_CENTER);

        let page = surface.to_page();
        assert!(page.contains("getElementById(\"readme-image-<\\/script>-0\")"));
        assert!(page.contains("behavior: 'smooth', block: 'center'"));
    }
}
