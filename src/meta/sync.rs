//! Applies post metadata to the shared document and restores site defaults

use std::sync::Arc;

use super::document::{lock_document, Document, SharedDocument};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{absolute_url, plain_text};

/// Every meta key written by [`MetaTagSynchronizer`], in write order
pub const META_KEYS: [&str; 15] = [
    "og:title",
    "og:description",
    "og:image",
    "og:url",
    "og:type",
    "og:site_name",
    "og:image:width",
    "og:image:height",
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
    "twitter:site",
    "description",
    "author",
];

/// The full set of values one synchronization writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadMetadata {
    /// Document title
    pub title: String,
    /// `(key, content)` for every entry of [`META_KEYS`]
    pub tags: Vec<(&'static str, String)>,
}

impl HeadMetadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn write_to(&self, document: &mut Document) {
        for (key, content) in &self.tags {
            document.upsert_meta_tag(key, content);
        }
        document.set_title(self.title.as_str());
    }
}

/// Writes social preview metadata into a document
///
/// All mutation of head metadata goes through [`apply_post_metadata`] and
/// [`reset_post_metadata`]; the most recent call wins. Without a document
/// both are no-ops.
///
/// [`apply_post_metadata`]: MetaTagSynchronizer::apply_post_metadata
/// [`reset_post_metadata`]: MetaTagSynchronizer::reset_post_metadata
#[derive(Clone)]
pub struct MetaTagSynchronizer {
    config: Arc<SiteConfig>,
    document: Option<SharedDocument>,
}

impl MetaTagSynchronizer {
    /// Create a synchronizer bound to a document
    pub fn new(config: Arc<SiteConfig>, document: SharedDocument) -> Self {
        Self {
            config,
            document: Some(document),
        }
    }

    /// Create a synchronizer with no document to write to
    pub fn detached(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            document: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&SharedDocument> {
        self.document.as_ref()
    }

    /// Metadata for a post shared at `url`
    pub fn post_metadata(&self, post: &Post, url: &str) -> HeadMetadata {
        let config = &*self.config;
        let title = post.title_or(&config.meta.post_title);

        let description = match plain_text(post.content_html(), config.meta.description_length)
        {
            text if text.trim().is_empty() => config.description.clone(),
            text => text,
        };

        let image = match post.thumbnail() {
            Some(thumbnail) => absolute_url(config.origin(), thumbnail),
            None => config.logo_url(),
        };

        build(
            config,
            HeadValues {
                og_title: title,
                description: &description,
                image: &image,
                url,
                og_type: "article",
                author: post.author_or(&config.author),
            },
            format!("{} - {}", title, config.title),
        )
    }

    /// Site-wide metadata shown when no post is active
    pub fn default_metadata(&self) -> HeadMetadata {
        let config = &*self.config;
        let image = config.logo_url();
        let url = config.home_url();

        build(
            config,
            HeadValues {
                og_title: &config.meta.home_title,
                description: &config.meta.home_description,
                image: &image,
                url: &url,
                og_type: "website",
                author: &config.title,
            },
            config.title.clone(),
        )
    }

    /// Point the document's preview metadata at `post`
    pub fn apply_post_metadata(&self, post: &Post, url: &str) {
        let metadata = self.post_metadata(post, url);
        if self.write(&metadata) {
            tracing::debug!("Applied share metadata for {:?}", metadata.title);
        }
    }

    /// Restore every key to its site default
    pub fn reset_post_metadata(&self) {
        let metadata = self.default_metadata();
        if self.write(&metadata) {
            tracing::debug!("Reset share metadata");
        }
    }

    fn write(&self, metadata: &HeadMetadata) -> bool {
        match &self.document {
            Some(document) => {
                metadata.write_to(&mut lock_document(document));
                true
            }
            None => {
                tracing::debug!("No document available, skipping metadata update");
                false
            }
        }
    }
}

struct HeadValues<'a> {
    og_title: &'a str,
    description: &'a str,
    image: &'a str,
    url: &'a str,
    og_type: &'a str,
    author: &'a str,
}

fn build(config: &SiteConfig, values: HeadValues<'_>, title: String) -> HeadMetadata {
    let tags = META_KEYS
        .iter()
        .map(|&key| {
            let content = match key {
                "og:title" | "twitter:title" => values.og_title.to_string(),
                "og:description" | "twitter:description" | "description" => {
                    values.description.to_string()
                }
                "og:image" | "twitter:image" => values.image.to_string(),
                "og:url" => values.url.to_string(),
                "og:type" => values.og_type.to_string(),
                "og:site_name" => config.title.clone(),
                "og:image:width" => config.meta.image_width.to_string(),
                "og:image:height" => config.meta.image_height.to_string(),
                "twitter:card" => config.meta.twitter_card.clone(),
                "twitter:site" => config.twitter_site.clone(),
                "author" => values.author.to_string(),
                _ => unreachable!("unhandled meta key {key}"),
            };
            (key, content)
        })
        .collect();

    HeadMetadata { title, tags }
}
