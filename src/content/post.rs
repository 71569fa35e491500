//! Post model as exported by the backend API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::helpers::date_portion;

/// A news post
///
/// Every field is optional: the API may return partial records, and the
/// share and metadata code resolves each missing field to a site default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Backend identifier (`_id` in API responses)
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Rendered HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Thumbnail URL, absolute or relative to the site origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// ISO-8601 timestamp of the last update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Post author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Post {
    /// Create a post with a title and HTML body
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    /// Title, or `fallback` when missing or blank
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.title.as_deref()).unwrap_or(fallback)
    }

    /// HTML body, empty when missing
    pub fn content_html(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Author name, or `fallback` when missing or blank
    pub fn author_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.author.as_ref().and_then(|a| a.name.as_deref())).unwrap_or(fallback)
    }

    /// Thumbnail if one is set
    pub fn thumbnail(&self) -> Option<&str> {
        non_blank(self.thumbnail.as_deref())
    }

    /// Date shown in share text: publication date, then last update, then `today`
    pub fn display_date(&self, today: NaiveDate) -> String {
        self.date
            .as_deref()
            .and_then(date_portion)
            .or_else(|| self.updated_at.as_deref().and_then(date_portion))
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string())
    }

    /// Last update as a calendar date
    pub fn updated_date(&self) -> Option<String> {
        self.updated_at.as_deref().and_then(date_portion)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "_id": "66a1",
            "title": "Budget 2025",
            "content": "<p>Big news today</p>",
            "author": {"name": "A. Sharma"},
            "updatedAt": "2025-04-01T00:00:00Z",
            "status": "published"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id.as_deref(), Some("66a1"));
        assert_eq!(post.author_or("x"), "A. Sharma");
        assert_eq!(post.updated_at.as_deref(), Some("2025-04-01T00:00:00Z"));
        assert_eq!(post.thumbnail(), None);
    }

    #[test]
    fn test_fallbacks() {
        let post = Post {
            title: Some("  ".to_string()),
            author: Some(Author { name: None }),
            ..Default::default()
        };
        assert_eq!(post.title_or("Default"), "Default");
        assert_eq!(post.author_or("Brand"), "Brand");
        assert_eq!(post.content_html(), "");
    }

    #[test]
    fn test_display_date_chain() {
        let mut post = Post::default();
        assert_eq!(post.display_date(today()), "2026-01-02");

        post.updated_at = Some("2025-04-01T00:00:00Z".to_string());
        assert_eq!(post.display_date(today()), "2025-04-01");

        post.date = Some("2025-03-15".to_string());
        assert_eq!(post.display_date(today()), "2025-03-15");
    }
}
