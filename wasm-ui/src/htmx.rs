//! htmx event plumbing.
//!
//! htmx fires `htmx:configRequest` before every request with a mutable
//! `detail.headers` object, and `htmx:load` whenever it inserts new content.

use std::rc::Rc;

use gloo::events::EventListener;
use hx_assist::{CsrfInjector, Error, RequestHeaders, Result};
use js_sys::{Object, Reflect};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Event, EventTarget};

pub const CONFIG_REQUEST_EVENT: &str = "htmx:configRequest";
pub const LOAD_EVENT: &str = "htmx:load";

/// The `detail.headers` object of an `htmx:configRequest` event.
pub struct JsHeaders(Object);

impl RequestHeaders for JsHeaders {
    fn set_header(&mut self, name: &str, value: &str) {
        if let Err(e) = Reflect::set(&self.0, &JsValue::from_str(name), &JsValue::from_str(value)) {
            warn!("could not set header {name}: {e:?}");
        }
    }
}

/// Header mapping of a configRequest event.
pub fn request_headers(event: &Event) -> Result<JsHeaders> {
    let event = event
        .dyn_ref::<CustomEvent>()
        .ok_or_else(|| Error::Dom(format!("{CONFIG_REQUEST_EVENT} is not a CustomEvent")))?;

    let detail = event.detail();
    if !detail.is_object() {
        return Err(Error::Dom("event has no detail".into()));
    }

    let headers = Reflect::get(&detail, &JsValue::from_str("headers"))
        .map_err(|e| Error::Dom(format!("detail.headers: {e:?}")))?;
    if !headers.is_object() {
        return Err(Error::Dom("detail.headers is not an object".into()));
    }
    Ok(JsHeaders(headers.unchecked_into()))
}

/// Set the CSRF header on every htmx request dispatched under `target`.
///
/// The listener lives as long as the returned handle.
pub fn install_csrf(target: &EventTarget, injector: Rc<CsrfInjector>) -> EventListener {
    EventListener::new(target, CONFIG_REQUEST_EVENT, move |event| {
        match request_headers(event) {
            Ok(mut headers) => injector.apply(&mut headers),
            Err(e) => warn!("{CONFIG_REQUEST_EVENT}: {e}"),
        }
    })
}
