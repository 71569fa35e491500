//! Copy a post's share text to the system clipboard

use anyhow::Result;

use crate::meta::MetaTagSynchronizer;
use crate::share::{ShareDialog, SystemClipboard};
use crate::Newsshare;

/// Copy through the share dialog, reporting whether it worked
pub async fn run(app: &Newsshare, id: &str, url: Option<&str>) -> Result<()> {
    let posts = app.load_posts()?;
    let post = posts.require(id)?.clone();
    let url = url.map(str::to_string).unwrap_or_else(|| app.post_url(id));

    let dialog = ShareDialog::new(MetaTagSynchronizer::detached(app.config.clone()), post, url);
    if dialog.copy_to_clipboard(&SystemClipboard).await {
        println!("Copied share text for {}", id);
    } else {
        println!("Could not copy share text; printing it instead:\n");
        println!("{}", dialog.copy_text());
    }

    Ok(())
}
