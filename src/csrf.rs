//! CSRF header injection for outgoing htmx requests.
//!
//! The server sets a `_csrf` cookie and expects its value echoed back in the
//! `X-CSRF-Token` header. htmx fires `htmx:configRequest` before each
//! request with a mutable header map; [`CsrfInjector::apply`] fills it.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::cookie::CookieJar;

pub const DEFAULT_CSRF_COOKIE: &str = "_csrf";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-Token";

/// Header value sent under [`MissingTokenPolicy::Empty`].
pub const MISSING_TOKEN_SENTINEL: &str = "";

/// Mutable header mapping of one in-flight request.
pub trait RequestHeaders {
    /// Set `name` to `value`, replacing only that entry.
    fn set_header(&mut self, name: &str, value: &str);
}

impl RequestHeaders for HashMap<String, String> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

impl RequestHeaders for BTreeMap<String, String> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// What to do when the CSRF cookie is missing or has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTokenPolicy {
    /// Send the header with [`MISSING_TOKEN_SENTINEL`].
    #[default]
    Empty,
    /// Leave the request's headers untouched.
    Omit,
}

impl MissingTokenPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Some(Self::Empty),
            "omit" => Some(Self::Omit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Omit => "omit",
        }
    }
}

/// Cookie and header names plus the missing-token policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
    pub missing: MissingTokenPolicy,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            header_name: DEFAULT_CSRF_HEADER.to_string(),
            missing: MissingTokenPolicy::default(),
        }
    }
}

/// Writes the CSRF token from a cookie snapshot into request headers.
///
/// The jar is captured at construction and never refreshed: a rotated token
/// is only picked up after a page reload.
#[derive(Debug)]
pub struct CsrfInjector {
    jar: CookieJar,
    config: CsrfConfig,
    warned: Cell<bool>,
}

impl CsrfInjector {
    pub fn new(jar: CookieJar, config: CsrfConfig) -> Self {
        debug!(
            "csrf injector: {} cookies, token cookie '{}' {}",
            jar.len(),
            config.cookie_name,
            if jar.get(&config.cookie_name).is_some() {
                "present"
            } else {
                "missing"
            }
        );
        Self {
            jar,
            config,
            warned: Cell::new(false),
        }
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    /// The header value to send, or `None` if the header is omitted.
    pub fn header_value(&self) -> Option<&str> {
        match self.jar.get(&self.config.cookie_name) {
            Some(token) => Some(token),
            None => match self.config.missing {
                MissingTokenPolicy::Empty => Some(MISSING_TOKEN_SENTINEL),
                MissingTokenPolicy::Omit => None,
            },
        }
    }

    /// Set the CSRF header on one outgoing request.
    pub fn apply<H: RequestHeaders + ?Sized>(&self, headers: &mut H) {
        if self.jar.get(&self.config.cookie_name).is_none() && !self.warned.replace(true) {
            warn!(
                "cookie '{}' not found; {} header policy is '{}'",
                self.config.cookie_name,
                self.config.header_name,
                self.config.missing.name()
            );
        }

        if let Some(value) = self.header_value() {
            headers.set_header(&self.config.header_name, value);
        }
    }
}
