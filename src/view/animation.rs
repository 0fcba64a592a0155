// src/view/animation.rs
// =============================================================================
// Page effects for the generated portfolio page.
//
// - Reveal: elements marked `animate-on-scroll` fade in the first time at
//   least `reveal_threshold` of them is on screen, then stop being observed.
// - Logo: letters bounce on hover (a running bounce is not restarted); on
//   load the header slides in and, `intro_delay` later, the logo bounces once
//   and glows. The end of each animation clears its class.
//
// The browser runs the effects; this module emits the CSS and the script
// with our parameters filled in.
// =============================================================================

use std::time::Duration;

use crate::document::escape_text;

/// Fraction of an element that must be visible before it is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Delay between the page load and the intro bounce + glow
pub const INTRO_DELAY: Duration = Duration::from_millis(700);

/// Stagger between two bouncing letters of the logo
const LETTER_STAGGER_MS: u64 = 50;

const EFFECTS_STYLE: &str = "\
.site-header { transition: opacity 0.7s ease-out, transform 0.7s ease-out; }
.site-header.is-hidden { opacity: 0; transform: translateY(-100%); }
.animate-on-scroll { opacity: 0; transform: translateY(1.5rem); transition: opacity 0.6s ease-out, transform 0.6s ease-out; }
.animate-on-scroll.is-visible { opacity: 1; transform: none; }
.bounce-letter { display: inline-block; }
#logo-text.is-animating .bounce-letter { animation: bounce 0.6s ease; }
.logo-glow { animation: glow 1.5s ease-in-out; }
@keyframes bounce { 0%, 100% { transform: translateY(0); } 40% { transform: translateY(-0.5rem); } }
@keyframes glow { 0%, 100% { filter: none; } 50% { filter: drop-shadow(0 0 0.75rem rgba(239, 68, 68, 0.8)); } }
";

const EFFECTS_SCRIPT: &str = "\
const observer = new IntersectionObserver((entries) => {
  entries.forEach((entry) => {
    if (entry.isIntersecting) {
      entry.target.classList.add('is-visible');
      observer.unobserve(entry.target);
    }
  });
}, { threshold: __THRESHOLD__ });
document.querySelectorAll('.animate-on-scroll').forEach((el) => observer.observe(el));

const header = document.querySelector('header');
const logoText = document.getElementById('logo-text');
const logoImage = document.getElementById('logo-image');
if (header && logoText && logoImage) {
  const letters = logoText.querySelectorAll('.bounce-letter');
  const playBounce = () => {
    if (!logoText.classList.contains('is-animating')) {
      logoText.classList.add('is-animating');
    }
  };
  if (letters.length > 0) {
    letters[letters.length - 1].addEventListener('animationend', () => {
      logoText.classList.remove('is-animating');
    });
  }
  logoText.addEventListener('mouseenter', playBounce);
  window.addEventListener('load', () => {
    header.classList.remove('is-hidden');
    setTimeout(() => {
      playBounce();
      logoImage.classList.add('logo-glow');
    }, __INTRO_DELAY_MS__);
  });
  logoImage.addEventListener('animationend', () => {
    logoImage.classList.remove('logo-glow');
  });
}
";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageEffects {
    pub reveal_threshold: f64,
    pub intro_delay: Duration,
}

impl Default for PageEffects {
    fn default() -> Self {
        Self {
            reveal_threshold: REVEAL_THRESHOLD,
            intro_delay: INTRO_DELAY,
        }
    }
}

impl PageEffects {
    pub fn style(&self) -> String {
        format!("<style>\n{}</style>\n", EFFECTS_STYLE)
    }

    pub fn script(&self) -> String {
        let body = EFFECTS_SCRIPT
            .replace("__THRESHOLD__", &self.reveal_threshold.to_string())
            .replace("__INTRO_DELAY_MS__", &self.intro_delay.as_millis().to_string());
        format!("<script>\n{}</script>\n", body)
    }
}

// The logo text, one bouncing span per character
pub fn logo_letters(text: &str) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "<span class=\"bounce-letter\" style=\"animation-delay: {}ms\">{}</span>",
                i as u64 * LETTER_STAGGER_MS,
                escape_text(&c.to_string())
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_reveals_once_at_threshold() {
        let script = PageEffects::default().script();

        assert!(script.contains("{ threshold: 0.1 }"));
        assert!(script.contains("entry.target.classList.add('is-visible');"));
        assert!(script.contains("observer.unobserve(entry.target);"));
        assert!(script.contains("querySelectorAll('.animate-on-scroll')"));
        assert!(!script.contains("__"));
    }

    #[test]
    fn test_intro_runs_after_load_delay() {
        let script = PageEffects::default().script();

        assert!(script.contains("header.classList.remove('is-hidden');"));
        assert!(script.contains("logoImage.classList.add('logo-glow');\n    }, 700);"));
        assert!(script.contains("logoImage.classList.remove('logo-glow');"));
        // hover does not restart a running bounce
        assert!(script.contains("if (!logoText.classList.contains('is-animating'))"));
    }

    #[test]
    fn test_custom_parameters() {
        let effects = PageEffects {
            reveal_threshold: 0.25,
            intro_delay: Duration::from_millis(1200),
        };
        let script = effects.script();
        assert!(script.contains("{ threshold: 0.25 }"));
        assert!(script.contains("}, 1200);"));
    }

    #[test]
    fn test_style_hides_until_revealed() {
        let style = PageEffects::default().style();
        assert!(style.starts_with("<style>\n"));
        assert!(style.contains(".animate-on-scroll { opacity: 0;"));
        assert!(style.contains(".animate-on-scroll.is-visible { opacity: 1;"));
        assert!(style.contains("@keyframes glow"));
    }

    #[test]
    fn test_logo_letters_are_staggered_and_escaped() {
        assert_eq!(
            logo_letters("a<"),
            "<span class=\"bounce-letter\" style=\"animation-delay: 0ms\">a</span>\
             <span class=\"bounce-letter\" style=\"animation-delay: 50ms\">&lt;</span>"
        );
    }
}
