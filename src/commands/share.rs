//! Print share text for a post

use anyhow::Result;

use crate::share::{format_share_content, ShareChannel, ShareContent};
use crate::Newsshare;

/// Share text for post `id`, shared at `url` or its canonical URL
pub fn content_for(app: &Newsshare, id: &str, url: Option<&str>) -> Result<ShareContent> {
    let posts = app.load_posts()?;
    let post = posts.require(id)?;
    let url = url.map(str::to_string).unwrap_or_else(|| app.post_url(id));
    Ok(format_share_content(&app.config, Some(post), &url))
}

/// Print one channel's text, or all channels as JSON
pub fn run(
    app: &Newsshare,
    id: &str,
    channel: Option<ShareChannel>,
    url: Option<&str>,
) -> Result<()> {
    let content = content_for(app, id, url)?;

    match channel {
        Some(channel) => match content.get(channel) {
            Some(text) => println!("{}", text),
            None => anyhow::bail!("No {} text for post {}", channel, id),
        },
        None => println!("{}", serde_json::to_string_pretty(&content)?),
    }

    Ok(())
}
