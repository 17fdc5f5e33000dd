//! Clipboard access for code copy buttons.

use crate::error::{Error, Result};

/// Destination for copied code.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform clipboard rejects the write.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard, connected lazily on first copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner =
                Some(arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| Error::Clipboard(e.to_string())),
            None => Err(Error::Clipboard("not connected".to_string())),
        }
    }
}
