//! Error type shared by the library, the CLI and the browser bindings.

use thiserror::Error;

/// Errors raised by hx-assist.
///
/// A missing CSRF cookie is deliberately not represented here; see
/// [`crate::MissingTokenPolicy`].
#[derive(Debug, Error)]
pub enum Error {
    /// The platform exposes no asynchronous clipboard.
    #[error("clipboard is unavailable in this context")]
    ClipboardUnavailable,

    /// The clipboard write was refused (permissions, focus, policy).
    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),

    /// A DOM lookup or call failed.
    #[error("dom error: {0}")]
    Dom(String),

    /// An invalid configuration key or value.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
