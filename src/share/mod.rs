//! Social sharing: per-channel text, provider links, clipboard and the share dialog

mod clipboard;
mod content;
mod dialog;
mod links;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use content::{format_share_content, format_share_content_on, ShareContent};
pub use dialog::{CloseReason, DialogState, DialogView, ShareButton, ShareDialog};
pub use links::{share_link, LinkParams, ShareChannel};
