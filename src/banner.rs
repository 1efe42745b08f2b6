//! Decorative marquee banners. The markup carries one copy of the glyph run;
//! this module replicates it and staggers per-glyph animation delays so the
//! CSS loop reads as a seamless flow.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Total copies of the original content after replication.
pub const COPIES: usize = 4;

// Delay step per glyph, in hundredths of a second. Integer math keeps the
// emitted strings free of float noise ("-0.15s", never "-0.150000...s").
const DELAY_STEP_HUNDREDTHS: i64 = 5;

/// A marquee container and its word-gap width.
pub struct Marquee {
    pub selector: &'static str,
    pub word_spacing_px: u32,
}

pub const MARQUEES: [Marquee; 2] = [
    Marquee {
        selector: ".banner",
        word_spacing_px: 25,
    },
    Marquee {
        selector: ".rsvp-banner-content",
        word_spacing_px: 30,
    },
];

pub fn replicate(content: &str) -> String {
    content.repeat(COPIES)
}

/// CSS animation-delay for the glyph at `index`: -0.05s per position.
pub fn stagger_delay(index: usize) -> String {
    let hundredths = -(DELAY_STEP_HUNDREDTHS * index as i64);
    format!("{}s", hundredths as f64 / 100.0)
}

/// Runs once at init. Containers absent from the page are skipped silently;
/// this is decoration, not function.
pub fn animate_marquees(document: &Document) {
    for marquee in &MARQUEES {
        if let Err(err) = animate(document, marquee) {
            log::debug!("marquee {} skipped: {err:?}", marquee.selector);
        }
    }
}

fn animate(document: &Document, marquee: &Marquee) -> Result<(), JsValue> {
    let Some(container) = document.query_selector(marquee.selector)? else {
        return Ok(());
    };

    let content = container.inner_html();
    container.set_inner_html(&replicate(&content));

    let leaves = container.query_selector_all("span, img")?;
    for index in 0..leaves.length() {
        let Some(node) = leaves.item(index) else {
            continue;
        };
        let Ok(leaf) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        leaf.style()
            .set_property("animation-delay", &stagger_delay(index as usize))?;
        // Bare-space spans carry the word gaps; widen them so words stay
        // legible at marquee speed.
        if leaf.tag_name() == "SPAN" && leaf.text_content().as_deref() == Some(" ") {
            leaf.style()
                .set_property("margin-right", &format!("{}px", marquee.word_spacing_px))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replication_quadruples_content() {
        let content = "<span>A</span><span> </span><span>B</span>";
        let replicated = replicate(content);
        assert_eq!(replicated.len(), content.len() * COPIES);
        assert_eq!(replicated.matches("<span>").count(), 3 * COPIES);
        assert!(replicated.starts_with(content));
    }

    #[test]
    fn stagger_delays_are_exact_decimals() {
        assert_eq!(stagger_delay(0), "0s");
        assert_eq!(stagger_delay(1), "-0.05s");
        assert_eq!(stagger_delay(2), "-0.1s");
        assert_eq!(stagger_delay(3), "-0.15s");
        assert_eq!(stagger_delay(10), "-0.5s");
        assert_eq!(stagger_delay(100), "-5s");
    }
}
