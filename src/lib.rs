//! newsshare: social share text and Open Graph metadata for news posts
//!
//! The crate keeps a model of the page document (head meta tags, title,
//! body overflow) and exposes the operations a reader-facing post view
//! needs: formatting per-channel share text, synchronizing link-preview
//! metadata with the post on screen, and driving the share dialog. A
//! preview server renders the same metadata for crawlers.

pub mod commands;
pub mod config;
pub mod content;
mod error;
pub mod helpers;
pub mod meta;
pub mod server;
pub mod share;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::PostStore;
use meta::{MetaTagSynchronizer, SharedDocument};

/// The main application context
#[derive(Clone)]
pub struct Newsshare {
    /// Site configuration
    pub config: Arc<config::SiteConfig>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding exported post JSON
    pub posts_dir: PathBuf,
}

impl Newsshare {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        Self {
            config: Arc::new(config),
            base_dir,
            posts_dir,
        }
    }

    /// Load all posts from the posts directory
    pub fn load_posts(&self) -> Result<PostStore> {
        PostStore::load(&self.posts_dir)
    }

    /// Canonical URL of a post
    pub fn post_url(&self, id: &str) -> String {
        helpers::full_url_for(&self.config, &format!("posts/{}", helpers::encode_url(id)))
    }

    /// A synchronizer writing to `document`
    pub fn synchronizer(&self, document: SharedDocument) -> MetaTagSynchronizer {
        MetaTagSynchronizer::new(Arc::clone(&self.config), document)
    }
}
