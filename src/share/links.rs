//! Share channels and their provider links

use std::fmt;

use crate::helpers::encode_url;

/// A target platform for shared text
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShareChannel {
    Whatsapp,
    Twitter,
    Telegram,
    Email,
    /// System clipboard
    Copy,
}

impl ShareChannel {
    pub const ALL: [ShareChannel; 5] = [
        ShareChannel::Whatsapp,
        ShareChannel::Twitter,
        ShareChannel::Telegram,
        ShareChannel::Email,
        ShareChannel::Copy,
    ];

    /// Channels that open an external share action
    pub const PROVIDERS: [ShareChannel; 4] = [
        ShareChannel::Whatsapp,
        ShareChannel::Twitter,
        ShareChannel::Telegram,
        ShareChannel::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShareChannel::Whatsapp => "WhatsApp",
            ShareChannel::Twitter => "Twitter",
            ShareChannel::Telegram => "Telegram",
            ShareChannel::Email => "Email",
            ShareChannel::Copy => "Copy",
        }
    }
}

impl fmt::Display for ShareChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a provider link carries besides the page URL
#[derive(Debug, Clone, Default)]
pub struct LinkParams<'a> {
    pub text: &'a str,
    /// Email subject
    pub subject: &'a str,
    /// Hashtags without the leading `#`
    pub hashtags: &'a [String],
}

/// `text` followed by `url`, unless the text already carries it
fn with_url(text: &str, url: &str) -> String {
    if text.is_empty() {
        url.to_string()
    } else if url.is_empty() || text.contains(url) {
        text.to_string()
    } else {
        format!("{} {}", text, url)
    }
}

/// Provider URL that starts a share of `url` on `channel`
///
/// WhatsApp and email have no URL parameter, so the URL goes at the end of
/// the message text. Returns `None` for [`ShareChannel::Copy`], which has
/// no provider.
pub fn share_link(channel: ShareChannel, url: &str, params: &LinkParams<'_>) -> Option<String> {
    let link = match channel {
        ShareChannel::Whatsapp => format!(
            "https://api.whatsapp.com/send?text={}",
            encode_url(&with_url(params.text, url))
        ),
        ShareChannel::Twitter => {
            let mut link = format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encode_url(url),
                encode_url(params.text)
            );
            if !params.hashtags.is_empty() {
                link.push_str("&hashtags=");
                link.push_str(&encode_url(&params.hashtags.join(",")));
            }
            link
        }
        ShareChannel::Telegram => format!(
            "https://t.me/share/url?url={}&text={}",
            encode_url(url),
            encode_url(params.text)
        ),
        ShareChannel::Email => format!(
            "mailto:?subject={}&body={}",
            encode_url(params.subject),
            encode_url(&with_url(params.text, url))
        ),
        ShareChannel::Copy => return None,
    };
    Some(link)
}
