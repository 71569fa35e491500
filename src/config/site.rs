//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Site name, used as the bare document title and `og:site_name`
    pub title: String,
    /// Default blurb used when a post has no text
    pub description: String,
    /// Brand name used when a post has no author
    pub author: String,
    pub language: String,

    // URL
    /// Site origin, e.g. `https://example.com`
    pub url: String,
    pub root: String,
    /// Default preview image, relative to the origin
    pub logo: String,
    /// Twitter handle for `twitter:site`
    pub twitter_site: String,

    // Directory
    pub posts_dir: String,

    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Newsroom".to_string(),
            description: "Stay updated with the latest news and information.".to_string(),
            author: "Newsroom".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            logo: "/assets/logo.jpeg".to_string(),
            twitter_site: "@Newsroom".to_string(),

            posts_dir: "posts".to_string(),

            meta: MetaConfig::default(),
            share: ShareConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// The site origin without a trailing slash
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of the home page
    pub fn home_url(&self) -> String {
        crate::helpers::full_url_for(self, "/")
    }

    /// Absolute URL of the default preview image
    pub fn logo_url(&self) -> String {
        crate::helpers::absolute_url(self.origin(), &self.logo)
    }
}

/// Head metadata defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Title used when a post has none
    pub post_title: String,
    /// `og:title` / `twitter:title` when no post is shown
    pub home_title: String,
    /// `description` / `og:description` when no post is shown
    pub home_description: String,
    pub description_length: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub twitter_card: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            post_title: "Newsroom - Latest News".to_string(),
            home_title: "Newsroom - Latest News & Updates".to_string(),
            home_description: "Stay updated with the latest news, government schemes, \
                               educational information, and more from Newsroom."
                .to_string(),
            description_length: 160,
            image_width: 1200,
            image_height: 630,
            twitter_card: "summary_large_image".to_string(),
        }
    }
}

/// Share dialog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Title used in share text when a post has none
    pub default_title: String,
    pub preview_length: usize,
    /// Excerpt length for character-limited channels
    pub twitter_excerpt_length: usize,
    /// Hashtags without the leading `#`
    pub hashtags: Vec<String>,
    /// How long the "copied" indicator stays visible
    pub copied_indicator_ms: u64,
    /// Delay before the document title is restored after close
    pub title_restore_ms: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            default_title: "Newsroom Article".to_string(),
            preview_length: 150,
            twitter_excerpt_length: 100,
            hashtags: vec![
                "Newsroom".to_string(),
                "News".to_string(),
                "LatestUpdate".to_string(),
            ],
            copied_indicator_ms: 2000,
            title_restore_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Newsroom");
        assert_eq!(config.meta.description_length, 160);
        assert_eq!(config.share.preview_length, 150);
        assert_eq!(config.share.copied_indicator_ms, 2000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Daily Ledger
url: https://example.com/
twitter_site: "@ledger"
share:
  hashtags: [Ledger]
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Daily Ledger");
        assert_eq!(config.origin(), "https://example.com");
        assert_eq!(config.share.hashtags, vec!["Ledger".to_string()]);
        // untouched sections keep their defaults
        assert_eq!(config.share.preview_length, 150);
        assert_eq!(config.meta.image_width, 1200);
    }

    #[test]
    fn test_logo_and_home_url() {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        assert_eq!(config.logo_url(), "https://example.com/assets/logo.jpeg");
        assert_eq!(config.home_url(), "https://example.com/");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From File\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From File");
    }
}
