//! Page-load wiring.
//!
//! Reads configuration from `data-hx-assist-*` attributes on `<body>`,
//! snapshots the cookies, and installs both behaviors. The two are
//! installed independently: a failure in one is logged and never removes
//! the other.

use std::rc::Rc;

use gloo::events::EventListener;
use hx_assist::{Config, CookieJar, CsrfInjector, Error, Result};
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, Window};

use crate::clipboard::{NavigatorClipboard, describe};
use crate::console;
use crate::htmx;
use crate::widget::CopyOnClickRegistry;

const CONFIG_ATTR_PREFIX: &str = "data-hx-assist-";

/// Listeners and registries that must live as long as the page.
pub struct App {
    widgets: Rc<CopyOnClickRegistry<NavigatorClipboard>>,
    _csrf: EventListener,
    _load: EventListener,
}

impl App {
    /// Rescan the document for copy-on-click inputs.
    ///
    /// Returns how many inputs were newly attached.
    pub fn rescan(&self) -> usize {
        self.widgets.scan(&gloo::utils::document()).unwrap_or_else(|e| {
            warn!("copy-on-click rescan: {e}");
            0
        })
    }
}

/// `key=value` overrides from `<body data-hx-assist-KEY="VALUE">`.
pub fn config_pairs(document: &Document) -> Vec<(String, String)> {
    let Some(body) = document.body() else {
        return Vec::new();
    };
    body.get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = name.strip_prefix(CONFIG_ATTR_PREFIX)?.to_string();
            let value = body.get_attribute(&name)?;
            Some((key, value))
        })
        .collect()
}

/// Configuration for this page. Invalid overrides are skipped one by one;
/// the valid ones still apply.
pub fn read_config(document: &Document) -> Config {
    let pairs = config_pairs(document);
    let mut config = Config::default();
    for e in config.apply_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))) {
        warn!("{e}; ignored");
    }
    config
}

/// Snapshot of `document.cookie`, taken once.
pub fn read_cookies(document: &Document) -> Result<CookieJar> {
    let html = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| Error::Dom("document is not an HTML document".into()))?;
    let raw = html
        .cookie()
        .map_err(|e| Error::Dom(format!("document.cookie: {}", describe(&e))))?;
    Ok(CookieJar::parse(&raw))
}

/// CSRF header listener. An unreadable cookie store counts as no cookies,
/// so the missing-token policy still applies.
fn install_csrf_header(window: &Window, document: &Document, config: &Config) -> EventListener {
    let jar = read_cookies(document).unwrap_or_else(|e| {
        warn!("{e}; treating cookies as empty");
        CookieJar::default()
    });
    let injector = Rc::new(CsrfInjector::new(jar, config.csrf.clone()));
    htmx::install_csrf(window, injector)
}

/// Copy-on-click registry and its `htmx:load` listener. A failed first scan
/// is logged; later loads scan again.
fn install_widgets(
    document: &Document,
    config: &Config,
) -> (Rc<CopyOnClickRegistry<NavigatorClipboard>>, EventListener) {
    let widgets = CopyOnClickRegistry::new(&config.widget_selector, NavigatorClipboard);
    if let Err(e) = widgets.scan(document) {
        warn!("copy-on-click: {e}");
    }
    let load = widgets.listen(document);
    (widgets, load)
}

pub fn start() -> App {
    console::init(Config::default().log_level);

    let window = gloo::utils::window();
    let document = gloo::utils::document();

    let config = read_config(&document);
    console::init(config.log_level);

    let csrf = install_csrf_header(&window, &document, &config);
    let (widgets, load) = install_widgets(&document, &config);

    info!(
        "hx-assist {} ready: {} header on htmx requests, {} copy-on-click inputs",
        env!("CARGO_PKG_VERSION"),
        config.csrf.header_name,
        widgets.active()
    );

    App {
        widgets,
        _csrf: csrf,
        _load: load,
    }
}
