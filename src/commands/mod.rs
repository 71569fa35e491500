//! CLI command implementations

pub mod copy;
pub mod list;
pub mod meta;
pub mod share;
