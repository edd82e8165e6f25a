//! Asynchronous clipboard backed by `navigator.clipboard.writeText`.

use std::future::{Future, ready};
use std::pin::Pin;

use hx_assist::{Clipboard, Error, Result};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// The platform clipboard. Unavailable outside secure contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorClipboard;

impl Clipboard for NavigatorClipboard {
    type Write = Pin<Box<dyn Future<Output = Result<()>>>>;

    fn write_text(&self, text: &str) -> Self::Write {
        match start_write(text) {
            Ok(promise) => Box::pin(async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| Error::ClipboardRejected(describe(&e)))
            }),
            Err(e) => Box::pin(ready(Err(e))),
        }
    }
}

fn start_write(text: &str) -> Result<Promise> {
    let navigator = gloo::utils::window().navigator();

    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| Error::ClipboardUnavailable)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(Error::ClipboardUnavailable);
    }

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or(Error::ClipboardUnavailable)?;

    write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| Error::ClipboardRejected(describe(&e)))?
        .dyn_into::<Promise>()
        .map_err(|_| Error::ClipboardRejected("writeText did not return a promise".into()))
}

/// Human-readable form of a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
