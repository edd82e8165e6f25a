//! Copy-on-click registration for marked inputs.
//!
//! Inputs matching the configured selector get a click listener that selects
//! the value and writes it to the clipboard. The registry is rescanned on
//! `htmx:load` so swapped-in inputs are picked up and removed ones release
//! their listener.
//!
//! Inputs inserted by other scripts are not seen until the next scan. Such
//! scripts can dispatch `htmx:load` on the new content, or call the exported
//! `rescanCopyOnClick()`.
//!
//! After every attempt the input dispatches a bubbling `CustomEvent`:
//! [`COPIED_EVENT`] with the copied text, or [`FAILED_EVENT`] with the error.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use hx_assist::{Clipboard, CopyOnClick, CopyTarget, Error, Result, WidgetState, copy_contents};
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, CustomEventInit, Document, EventTarget, HtmlInputElement};

use crate::clipboard::describe;
use crate::htmx::LOAD_EVENT;

pub const COPIED_EVENT: &str = "copy-on-click:copied";
pub const FAILED_EVENT: &str = "copy-on-click:failed";

struct InputTarget<'a>(&'a HtmlInputElement);

impl CopyTarget for InputTarget<'_> {
    fn value(&self) -> String {
        self.0.value()
    }

    fn select_all(&self) -> Result<()> {
        self.0.select();
        Ok(())
    }
}

/// Copy the input's value, then report the outcome as a DOM event.
pub fn copy_on_click<C>(input: &HtmlInputElement, clipboard: &C)
where
    C: Clipboard + ?Sized,
    C::Write: 'static,
{
    let text = input.value();
    match copy_contents(&InputTarget(input), clipboard) {
        Ok(pending) => {
            let input = input.clone();
            spawn_local(async move {
                let result = pending.await;
                notify(&input, &text, result);
            });
        }
        Err(e) => notify(input, &text, Err(e)),
    }
}

fn notify(input: &HtmlInputElement, text: &str, result: Result<()>) {
    let (name, detail) = match result {
        Ok(()) => (COPIED_EVENT, JsValue::from_str(text)),
        Err(e) => {
            warn!("copy failed: {e}");
            (FAILED_EVENT, JsValue::from_str(&e.to_string()))
        }
    };

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = input.dispatch_event(&event);
        }
        Err(e) => warn!("could not create {name}: {}", describe(&e)),
    }
}

struct Entry {
    input: HtmlInputElement,
    widget: CopyOnClick<EventListener>,
}

/// Tracks which inputs have their click listener installed.
pub struct CopyOnClickRegistry<C> {
    selector: String,
    clipboard: Rc<C>,
    entries: RefCell<Vec<Entry>>,
}

impl<C> CopyOnClickRegistry<C>
where
    C: Clipboard + 'static,
    C::Write: 'static,
{
    pub fn new(selector: &str, clipboard: C) -> Rc<Self> {
        Rc::new(Self {
            selector: selector.to_string(),
            clipboard: Rc::new(clipboard),
            entries: RefCell::new(Vec::new()),
        })
    }

    /// Attach new matches under `document` and release disconnected inputs.
    ///
    /// Returns how many inputs were attached by this scan.
    pub fn scan(&self, document: &Document) -> Result<usize> {
        let mut entries = self.entries.borrow_mut();

        let before = entries.len();
        entries.retain_mut(|entry| {
            if entry.input.is_connected() {
                return true;
            }
            entry.widget.disconnect();
            false
        });
        if entries.len() != before {
            debug!("released {} disconnected inputs", before - entries.len());
        }

        let nodes = document
            .query_selector_all(&self.selector)
            .map_err(|e| Error::Dom(format!("bad selector '{}': {}", self.selector, describe(&e))))?;

        let mut attached = 0;
        for i in 0..nodes.length() {
            let Some(node) = nodes.item(i) else { continue };
            let Ok(input) = node.dyn_into::<HtmlInputElement>() else {
                warn!("'{}' matched a non-input element; skipped", self.selector);
                continue;
            };

            if entries.iter().any(|entry| entry.input == input) {
                continue;
            }

            let mut widget = CopyOnClick::new();
            widget.connect(|| self.click_listener(&input));
            entries.push(Entry { input, widget });
            attached += 1;
        }

        if attached > 0 {
            debug!("copy-on-click attached to {attached} inputs");
        }
        Ok(attached)
    }

    /// Rescan whenever htmx loads new content under `target`.
    pub fn listen(self: &Rc<Self>, target: &EventTarget) -> EventListener {
        let registry = Rc::clone(self);
        EventListener::new(target, LOAD_EVENT, move |_| {
            if let Err(e) = registry.scan(&gloo::utils::document()) {
                warn!("{LOAD_EVENT}: {e}");
            }
        })
    }

    /// Number of inputs with an active listener.
    pub fn active(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn state_of(&self, input: &HtmlInputElement) -> WidgetState {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.input == *input)
            .map_or(WidgetState::Unattached, |entry| entry.widget.state())
    }

    fn click_listener(&self, input: &HtmlInputElement) -> EventListener {
        let clipboard = Rc::clone(&self.clipboard);
        let target = input.clone();
        EventListener::new(input, "click", move |_| copy_on_click(&target, &*clipboard))
    }
}
