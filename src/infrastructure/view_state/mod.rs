//! Dashboard row view state
//!
//! Reveal toggles and clipboard feedback, keyed by record id. Kept
//! apart from the key store: neither concern reads record content or
//! touches persistence.

mod clipboard;
mod visibility;

pub use clipboard::{
    Clipboard, ClipboardFeedback, InMemoryClipboard, COPIED_MARKER_DURATION,
};
pub use visibility::VisibilityState;
