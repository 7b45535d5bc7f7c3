//! Tile grid overlay for a browser map editor.
//!
//! Load the generated module from a userscript and call
//! `attachGridOverlay()`; the overlay attaches itself once the editor page
//! has rendered its canvas and footer.

use wasm_bindgen::prelude::*;

pub mod boot;
pub mod config;
pub mod controls;
pub mod host;
pub mod local_store;

pub use config::OverlayConfig;

#[wasm_bindgen(js_name = attachGridOverlay)]
pub fn attach_grid_overlay() {
    console_error_panic_hook::set_once();
    boot::start(OverlayConfig::from_env());
}
