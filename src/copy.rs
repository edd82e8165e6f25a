//! Copy-on-click inputs.
//!
//! A marked input copies its whole value to the clipboard when clicked:
//! the text is selected first, then written. [`CopyOnClick`] tracks whether
//! the click listener is installed so an element is attached at most once
//! per connection to the document.

use std::future::Future;

use log::debug;

use crate::error::Result;

/// An input whose text can be read and selected.
pub trait CopyTarget {
    fn value(&self) -> String;

    /// Select the whole value, as a user's select-all would.
    fn select_all(&self) -> Result<()>;
}

/// Asynchronous clipboard write.
pub trait Clipboard {
    type Write: Future<Output = Result<()>>;

    /// Start writing `text`. The write is initiated before this returns so
    /// it still runs inside the user gesture that triggered it.
    fn write_text(&self, text: &str) -> Self::Write;
}

/// Select the target's contents and start copying them.
///
/// Returns the pending write; await it for the outcome.
pub fn copy_contents<T, C>(target: &T, clipboard: &C) -> Result<C::Write>
where
    T: CopyTarget + ?Sized,
    C: Clipboard + ?Sized,
{
    let text = target.value();
    target.select_all()?;
    debug!("copying {} characters", text.chars().count());
    Ok(clipboard.write_text(&text))
}

/// Length of `s` in UTF-16 code units, the unit DOM selection offsets use.
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Present in markup, no click listener.
    Unattached,
    /// Connected to the document with its click listener installed.
    Active,
}

/// Attachment state of one copy-on-click element.
///
/// `L` is the listener handle; dropping it must remove the listener.
#[derive(Debug)]
pub struct CopyOnClick<L> {
    listener: Option<L>,
}

impl<L> Default for CopyOnClick<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> CopyOnClick<L> {
    pub fn new() -> Self {
        Self { listener: None }
    }

    pub fn state(&self) -> WidgetState {
        if self.listener.is_some() {
            WidgetState::Active
        } else {
            WidgetState::Unattached
        }
    }

    /// Install the listener if not already active. Returns true if `install`
    /// was called.
    pub fn connect(&mut self, install: impl FnOnce() -> L) -> bool {
        if self.listener.is_some() {
            return false;
        }
        self.listener = Some(install());
        true
    }

    /// Drop the listener. Returns true if one was installed.
    pub fn disconnect(&mut self) -> bool {
        self.listener.take().is_some()
    }
}
