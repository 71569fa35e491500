//! Helper functions shared by the metadata, share and server modules

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
