//! HTML helper functions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENTITY_RE: Regex = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[A-Za-z/!?][^>]*>").unwrap();
}

/// Ellipsis appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
///
/// A `<` not followed by a tag name, `/`, `!` or `?` is kept as text.
pub fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Decode character references the way a browser does for text content
///
/// Unknown named entities are left untouched.
pub fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Plain text content of an HTML fragment, capped at `max_length` characters
///
/// Text longer than `max_length` is cut to exactly `max_length` characters
/// followed by [`ELLIPSIS`]. Shorter text is returned unchanged.
///
/// # Examples
/// ```
/// use newsshare::helpers::plain_text;
/// assert_eq!(plain_text("<p>Hello <b>World</b></p>", 5), "Hello...");
/// ```
pub fn plain_text(html: &str, max_length: usize) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = decode_entities(&strip_html(html));
    truncate(&text, max_length)
}

/// Truncate a string to `length` characters, appending [`ELLIPSIS`] if cut
pub fn truncate(s: &str, length: usize) -> String {
    match s.char_indices().nth(length) {
        Some((idx, _)) => format!("{}{}", &s[..idx], ELLIPSIS),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&#8377;5 &#x20B9;5"), "₹5 ₹5");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(plain_text("", 150), "");
        assert_eq!(plain_text("<p></p>", 150), "");
    }

    #[test]
    fn test_plain_text_truncates_to_exact_length() {
        let html = format!("<p>{}</p>", "a".repeat(200));
        let text = plain_text(&html, 150);
        assert_eq!(text, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn test_plain_text_boundary() {
        let exact = "b".repeat(160);
        assert_eq!(plain_text(&exact, 160), exact);
        assert_eq!(plain_text("<i>short</i>", 160), "short");
    }

    #[test]
    fn test_plain_text_keeps_bare_angle_brackets() {
        assert_eq!(plain_text("<p>3 < 5 and 7 > 4</p>", 150), "3 < 5 and 7 > 4");
        assert_eq!(plain_text("<p>a <5% cut</p><!-- note -->", 150), "a <5% cut");
        assert_eq!(strip_html("<br/>x<?xml?>y</ p>"), "xy");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("नमस्ते दुनिया", 3), "नमस...");
        assert_eq!(truncate("Hi", 10), "Hi");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Q&A</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Q&amp;A&lt;/a&gt;"
        );
    }
}
