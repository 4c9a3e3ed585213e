use arboard::Clipboard;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
    #[error("clipboard lock poisoned")]
    Poisoned,
}

// Kept alive between calls: on X11 the copied text disappears with its owner.
static CLIPBOARD: Mutex<Option<Clipboard>> = Mutex::new(None);

pub fn copy_text_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut guard = CLIPBOARD.lock().map_err(|_| ClipboardError::Poisoned)?;

    let mut clipboard = match guard.take() {
        Some(clipboard) => clipboard,
        None => Clipboard::new()?,
    };
    let result = clipboard.set_text(text.to_owned());
    *guard = Some(clipboard);

    Ok(result?)
}
