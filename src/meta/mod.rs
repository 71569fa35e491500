//! Head metadata: the document model and the synchronizer that writes to it

mod document;
mod sync;

pub use document::{lock_document, shared, BodyStyle, Document, MetaTag, SharedDocument};
pub use sync::{HeadMetadata, MetaTagSynchronizer, META_KEYS};
