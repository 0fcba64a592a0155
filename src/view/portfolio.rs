// src/view/portfolio.rs
// =============================================================================
// The portfolio page: animated header with the owner's logo, then the project
// cards (or the message that replaces them).
//
// Each card is revealed on scroll with its own transition delay, so the grid
// fades in one card after the other.
// =============================================================================

use super::animation::{logo_letters, PageEffects};
use crate::document::{escape_attr, escape_text};
use crate::github::{Listing, RepoCard};

const BASE_STYLE: &str = "<style>\n\
body { font-family: system-ui, sans-serif; background: #111827; color: #e5e7eb; margin: 0; }\n\
.site-header { display: flex; align-items: center; gap: 0.75rem; padding: 1rem 1.5rem; }\n\
#logo-image { width: 3rem; height: 3rem; border-radius: 9999px; }\n\
main { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }\n\
#repos-container { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }\n\
.repo-card { border-radius: 1rem; padding: 1.5rem; background: #1f2937; }\n\
.language-dot { display: inline-block; width: 0.5rem; height: 0.5rem; border-radius: 9999px; background: #9ca3af; }\n\
.listing-message { grid-column: 1 / -1; text-align: center; color: #9ca3af; }\n\
a { color: #f3f4f6; }\n\
</style>\n";

pub fn render_portfolio_page(owner: &str, listing: &Listing, effects: &PageEffects) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{} - Projects</title>\n", escape_text(owner)));
    page.push_str(BASE_STYLE);
    page.push_str(&effects.style());
    page.push_str("</head>\n<body>\n");

    page.push_str("<header class=\"site-header is-hidden\">\n");
    page.push_str(&format!(
        "  <img id=\"logo-image\" src=\"https://github.com/{}.png\" alt=\"\">\n",
        escape_attr(owner)
    ));
    page.push_str(&format!("  <h1 id=\"logo-text\">{}</h1>\n", logo_letters(owner)));
    page.push_str("</header>\n");

    page.push_str("<main>\n<h2 class=\"animate-on-scroll\">Projects</h2>\n<div id=\"repos-container\">\n");
    match listing {
        Listing::Cards(cards) => {
            for card in cards {
                page.push_str(&render_card(card));
            }
        }
        other => {
            if let Some(message) = other.message() {
                page.push_str(&format!(
                    "<p class=\"listing-message\">{}</p>\n",
                    escape_text(message)
                ));
            }
        }
    }
    page.push_str("</div>\n</main>\n");

    page.push_str(&effects.script());
    page.push_str("</body>\n</html>\n");
    page
}

fn render_card(card: &RepoCard) -> String {
    let mut out = format!(
        "<div class=\"repo-card animate-on-scroll\" style=\"transition-delay: {}ms\">\n",
        card.reveal_delay_ms
    );
    out.push_str(&format!("  <h3>{}</h3>\n", escape_text(&card.name)));
    out.push_str(&format!("  <p>{}</p>\n", escape_text(&card.description)));

    if let Some(language) = &card.language {
        let color = card.language_color.as_deref().unwrap_or_default();
        out.push_str(&format!(
            "  <span class=\"repo-language\"><span class=\"language-dot {}\"></span> {}</span>\n",
            escape_attr(color),
            escape_text(language)
        ));
    }
    out.push_str(&format!(
        "  <span class=\"repo-stars\">★ {}</span> <span class=\"repo-updated\">Updated {}</span>\n",
        card.stars,
        escape_text(&card.updated)
    ));
    out.push_str(&format!(
        "  <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>\n",
        escape_attr(&card.github_url)
    ));
    if let Some(website) = &card.website {
        out.push_str(&format!(
            "  <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Website</a>\n",
            escape_attr(website)
        ));
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, index: u64) -> RepoCard {
        RepoCard {
            name: name.to_string(),
            description: "No description available.".into(),
            language: Some("Rust".into()),
            language_color: Some("bg-orange-400".into()),
            stars: 3,
            updated: "2d ago".into(),
            github_url: format!("https://github.com/bar/{}", name),
            website: None,
            reveal_delay_ms: index * 100,
        }
    }

    #[test]
    fn test_cards_reveal_with_staggered_delay() {
        let listing = Listing::Cards(vec![card("alpha", 0), card("beta", 1)]);
        let page = render_portfolio_page("bar", &listing, &PageEffects::default());

        assert!(page.contains(
            "<div class=\"repo-card animate-on-scroll\" style=\"transition-delay: 0ms\">\n  <h3>alpha</h3>"
        ));
        assert!(page.contains(
            "<div class=\"repo-card animate-on-scroll\" style=\"transition-delay: 100ms\">\n  <h3>beta</h3>"
        ));
        assert!(page.contains("<span class=\"language-dot bg-orange-400\"></span> Rust"));
        assert!(!page.contains("listing-message"));
    }

    #[test]
    fn test_page_carries_effects() {
        let page = render_portfolio_page("bar", &Listing::Empty, &PageEffects::default());

        assert!(page.contains("<header class=\"site-header is-hidden\">"));
        assert!(page.contains("<h1 id=\"logo-text\"><span class=\"bounce-letter\""));
        assert!(page.contains("<img id=\"logo-image\" src=\"https://github.com/bar.png\""));
        assert!(page.contains("new IntersectionObserver"));
        assert!(page.contains(".animate-on-scroll.is-visible"));
    }

    #[test]
    fn test_messages_replace_cards() {
        let empty = render_portfolio_page("bar", &Listing::Empty, &PageEffects::default());
        assert!(empty.contains("<p class=\"listing-message\">No other public repositories found.</p>"));

        let failed = render_portfolio_page("bar", &Listing::Failed, &PageEffects::default());
        assert!(failed.contains(
            "<p class=\"listing-message\">Could not load projects. Please try again later.</p>"
        ));
        assert!(!failed.contains("repo-card"));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let mut evil = card("<b>x</b>", 0);
        evil.website = Some("https://x.io/?a=\"1\"".into());
        let page = render_portfolio_page("bar", &Listing::Cards(vec![evil]), &PageEffects::default());

        assert!(page.contains("<h3>&lt;b&gt;x&lt;/b&gt;</h3>"));
        assert!(page.contains("href=\"https://x.io/?a=&quot;1&quot;\""));
    }
}
