//! # hx-assist
//!
//! Client-side helpers for server-rendered pages driven by htmx.
//!
//! This crate holds the browser-independent logic; `hx-assist-web` binds it
//! to the DOM.
//!
//! ## Overview
//!
//! - **Cookie jar**: an immutable snapshot of `document.cookie`
//! - **CSRF injector**: copies the `_csrf` cookie into the `X-CSRF-Token`
//!   header of every outgoing htmx request
//! - **Copy-on-click**: selects an input's text and writes it to the
//!   clipboard when clicked
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use hx_assist::{CookieJar, CsrfConfig, CsrfInjector};
//!
//! let jar = CookieJar::parse("theme=dark; _csrf=TOKEN123");
//! let injector = CsrfInjector::new(jar, CsrfConfig::default());
//!
//! let mut headers: HashMap<String, String> = HashMap::new();
//! injector.apply(&mut headers);
//!
//! assert_eq!(headers["X-CSRF-Token"], "TOKEN123");
//! ```

pub mod config;
pub mod cookie;
pub mod copy;
pub mod csrf;
pub mod error;

pub use config::{Config, DEFAULT_WIDGET_SELECTOR};
pub use cookie::CookieJar;
pub use copy::{Clipboard, CopyOnClick, CopyTarget, WidgetState, copy_contents, utf16_len};
pub use csrf::{
    CsrfConfig, CsrfInjector, DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER, MISSING_TOKEN_SENTINEL,
    MissingTokenPolicy, RequestHeaders,
};
pub use error::{Error, Result};
