//! Configuration module

mod site;

pub use site::MetaConfig;
pub use site::ShareConfig;
pub use site::SiteConfig;
