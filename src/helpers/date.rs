//! Date helper functions

use chrono::{DateTime, Local, NaiveDate};

/// Calendar date of a timestamp, formatted `YYYY-MM-DD`
///
/// RFC 3339 timestamps keep their own offset, so the result matches the
/// leading date digits. Strings that start with a plain `YYYY-MM-DD` date
/// also work. Anything else yields `None`.
///
/// # Examples
/// ```
/// use newsshare::helpers::date_portion;
/// assert_eq!(date_portion("2025-04-01T00:00:00Z").as_deref(), Some("2025-04-01"));
/// assert_eq!(date_portion("April 1st"), None);
/// ```
pub fn date_portion(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }

    timestamp
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
