//! Browser bindings for hx-assist
//!
//! Loaded once per page next to htmx. Adds the CSRF header to every htmx
//! request and turns marked inputs into copy-on-click fields.

pub mod bootstrap;
pub mod clipboard;
mod console;
pub mod htmx;
pub mod widget;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static APP: RefCell<Option<bootstrap::App>> = const { RefCell::new(None) };
}

/// Entry point for the WASM module.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    let app = bootstrap::start();
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

/// Attach copy-on-click to inputs inserted by scripts other than htmx.
///
/// Returns how many inputs were newly attached.
#[wasm_bindgen(js_name = rescanCopyOnClick)]
pub fn rescan_copy_on_click() -> usize {
    APP.with(|slot| slot.borrow().as_ref().map_or(0, bootstrap::App::rescan))
}
