//! Per-channel share text derived from a post and its URL

use chrono::NaiveDate;
use serde::Serialize;

use super::ShareChannel;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{plain_text, today, truncate};

/// Formatted share text for each channel
///
/// Empty (every channel `None`) when there was no post to share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
}

impl ShareContent {
    pub fn is_empty(&self) -> bool {
        ShareChannel::ALL.iter().all(|c| self.get(*c).is_none())
    }

    pub fn get(&self, channel: ShareChannel) -> Option<&str> {
        match channel {
            ShareChannel::Whatsapp => self.whatsapp.as_deref(),
            ShareChannel::Twitter => self.twitter.as_deref(),
            ShareChannel::Telegram => self.telegram.as_deref(),
            ShareChannel::Email => self.email.as_deref(),
            ShareChannel::Copy => self.copy.as_deref(),
        }
    }
}

/// Format share text for `post` at `url`, dated today when the post has no date
pub fn format_share_content(config: &SiteConfig, post: Option<&Post>, url: &str) -> ShareContent {
    format_share_content_on(config, post, url, today())
}

/// Format share text with an explicit fallback date
pub fn format_share_content_on(
    config: &SiteConfig,
    post: Option<&Post>,
    url: &str,
    today: NaiveDate,
) -> ShareContent {
    let Some(post) = post else {
        return ShareContent::default();
    };

    let share = &config.share;
    let title = post.title_or(&share.default_title);
    let preview = plain_text(post.content_html(), share.preview_length);
    let author = post.author_or(&config.author);
    let date = post.display_date(today);

    let hashtags = share
        .hashtags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    let lead_hashtag = share
        .hashtags
        .first()
        .map(|t| format!("\n\n#{}", t))
        .unwrap_or_default();
    let hashtag_block = if hashtags.is_empty() {
        String::new()
    } else {
        format!("\n\n{}", hashtags)
    };

    let rich = format!(
        "📰 *{title}*\n\n{preview}\n\n👤 *Author:* {author}\n📅 *Date:* {date}\n\n🔗 Read full article: {url}{hashtag_block}"
    );

    let excerpt = truncate(&preview, share.twitter_excerpt_length);
    let twitter = format!("📰 {title}\n\n{excerpt}\n\n👤 By {author} · {date}\n🔗 {url}");

    let telegram = format!(
        "📰 *{title}*\n\n{preview}\n\n👤 By: {author}\n📅 {date}\n\n🔗 [Read Full Article]({url}){lead_hashtag}"
    );

    let email = format!(
        "Dear Reader,\n\nI wanted to share this interesting article with you:\n\n\"{title}\"\n\n{preview}\n\n\
         This article was written by {author} and published on {date}.\n\n\
         You can read the complete article here: {url}\n\nBest regards,\nShared via {site}",
        site = config.title,
    );

    ShareContent {
        whatsapp: Some(rich.clone()),
        twitter: Some(twitter),
        telegram: Some(telegram),
        email: Some(email),
        copy: Some(rich),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Author;

    const URL: &str = "https://example.com/p/1";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn budget_post() -> Post {
        Post {
            title: Some("Budget 2025".to_string()),
            content: Some("<p>Big news today</p>".to_string()),
            author: Some(Author {
                name: Some("A. Sharma".to_string()),
            }),
            updated_at: Some("2025-04-01T00:00:00Z".to_string()),
            ..Default::default()
        }
    }

    fn assert_in_order(text: &str, parts: &[&str]) {
        let mut from = 0;
        for part in parts {
            let found = text[from..]
                .find(part)
                .unwrap_or_else(|| panic!("{part:?} missing or out of order in {text:?}"));
            from += found + part.len();
        }
    }

    #[test]
    fn test_missing_post_is_empty() {
        let content = format_share_content(&SiteConfig::default(), None, URL);
        assert!(content.is_empty());
        assert_eq!(serde_json::to_string(&content).unwrap(), "{}");
    }

    #[test]
    fn test_whatsapp_scenario() {
        let config = SiteConfig::default();
        let content = format_share_content_on(&config, Some(&budget_post()), URL, today());
        assert_in_order(
            content.whatsapp.as_deref().unwrap(),
            &["Budget 2025", "Big news today", "A. Sharma", "2025-04-01", URL],
        );
        assert_eq!(content.copy, content.whatsapp);
    }

    #[test]
    fn test_every_channel_carries_all_inputs() {
        let config = SiteConfig::default();
        let content = format_share_content_on(&config, Some(&budget_post()), URL, today());
        for channel in ShareChannel::ALL {
            let text = content.get(channel).unwrap();
            for part in ["Budget 2025", "Big news today", "A. Sharma", "2025-04-01", URL] {
                assert!(text.contains(part), "{channel:?} lacks {part:?}");
            }
        }
    }

    #[test]
    fn test_fallbacks() {
        let config = SiteConfig::default();
        let content = format_share_content_on(&config, Some(&Post::default()), URL, today());
        let text = content.whatsapp.unwrap();
        assert!(text.contains("*Newsroom Article*"));
        assert!(text.contains("*Author:* Newsroom"));
        assert!(text.contains("2026-10-19"));
    }

    #[test]
    fn test_twitter_excerpt() {
        let config = SiteConfig::default();
        let post = Post::new("Long read", &format!("<p>{}</p>", "w".repeat(140)));
        let content = format_share_content_on(&config, Some(&post), URL, today());
        let twitter = content.twitter.unwrap();
        assert!(twitter.contains(&format!("{}...\n", "w".repeat(100))));
        assert!(!twitter.contains(&"w".repeat(101)));
    }

    #[test]
    fn test_hashtags_from_config() {
        let mut config = SiteConfig::default();
        config.share.hashtags = vec!["Ledger".to_string(), "Daily".to_string()];
        let content = format_share_content_on(&config, Some(&budget_post()), URL, today());
        assert!(content.whatsapp.unwrap().ends_with("#Ledger #Daily"));
        assert!(content.telegram.unwrap().ends_with("#Ledger"));
    }
}
