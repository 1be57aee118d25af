//! Browser host for the polygon desk.
//!
//! Builds the page, wires DOM events to the [`canvas`] engine, persists the
//! scene to `localStorage`, and schedules animation frames.

mod app;
mod error;
mod palette_view;
mod shell;
mod storage;

use wasm_bindgen::prelude::*;

#[cfg(debug_assertions)]
const LOG_LEVEL: log::Level = log::Level::Debug;
#[cfg(not(debug_assertions))]
const LOG_LEVEL: log::Level = log::Level::Info;

/// Entry point run when the wasm module loads.
///
/// # Errors
///
/// Returns the startup failure as a string `JsValue`.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(LOG_LEVEL) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {e}")));
    }
    app::mount().map_err(|e| {
        log::error!("startup failed: {e}");
        JsValue::from(e)
    })
}
