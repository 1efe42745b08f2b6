//! Smooth in-page anchor scrolling and the scroll-dependent navbar shadow.

use std::cell::Cell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom;

/// Offset past which the navbar casts a shadow.
pub const NAVBAR_SHADOW_THRESHOLD: f64 = 100.0;

const NAVBAR_SHADOW: &str = "0 2px 10px rgba(0,0,0,0.1)";

/// Shadow for a given scroll offset, `None` meaning no shadow.
pub fn navbar_shadow(offset: f64) -> Option<&'static str> {
    (offset > NAVBAR_SHADOW_THRESHOLD).then_some(NAVBAR_SHADOW)
}

/// Intercepts clicks on every same-page anchor and animates the viewport to
/// the referenced element. A fragment with no matching element is a no-op.
pub fn install_anchor_scrolling(document: &Document) -> Result<(), JsValue> {
    let anchors = document.query_selector_all(r##"a[href^="#"]"##)?;
    for index in 0..anchors.length() {
        let Some(anchor) = anchors.item(index) else {
            continue;
        };
        let document = document.clone();
        dom::listen(anchor.as_ref(), "click", move |event| {
            event.prevent_default();
            let Some(href) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("href"))
            else {
                return;
            };
            if let Some(target) = dom::query(&document, &href) {
                scroll_to(&target);
            }
        })?;
    }
    Ok(())
}

fn scroll_to(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Toggles the navbar shadow on every scroll event.
pub fn install_navbar_shading(document: &Document) -> Result<(), JsValue> {
    let Some(navbar) = dom::query(document, ".navbar") else {
        return Ok(());
    };
    let Ok(navbar) = navbar.dyn_into::<HtmlElement>() else {
        return Ok(());
    };

    let window = dom::window()?;
    let reader = window.clone();
    let last_offset = Cell::new(0.0_f64);
    dom::listen(window.as_ref(), "scroll", move |_| {
        let offset = reader.page_y_offset().unwrap_or(0.0);
        let shadow = navbar_shadow(offset).unwrap_or("none");
        let _ = navbar.style().set_property("box-shadow", shadow);
        last_offset.set(offset);
    })
}
