//! Content module - post model and loading

pub mod loader;
mod post;

pub use loader::PostStore;
pub use post::{Author, Post};
