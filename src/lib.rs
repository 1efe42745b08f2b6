//! Client-side behavior for a static wedding invitation page, compiled to
//! WebAssembly and attached with `#[wasm_bindgen(start)]`.
//!
//! Three independent behaviors wire themselves up on load:
//! - smooth scrolling for in-page anchor links,
//! - the infinite marquee banners,
//! - the RSVP workflow (guest lookup + pre-fill, then form submission to a
//!   spreadsheet-backed endpoint).
//!
//! They share no state; each runs to completion on its own events. The pure
//! core (payload assembly, messages, banner math) builds as an rlib and is
//! unit-tested on the host.

use wasm_bindgen::prelude::*;

pub mod banner;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod rsvp;
pub mod scroll;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let document = dom::document()?;

    scroll::install_anchor_scrolling(&document)?;
    scroll::install_navbar_shading(&document)?;
    banner::animate_marquees(&document);
    rsvp::install(&document)?;

    log::debug!("page behaviors installed");
    Ok(())
}
