//! Print the head metadata for a post

use anyhow::Result;

use crate::meta::{lock_document, shared, Document};
use crate::Newsshare;

/// Rendered head for post `id`, or the site defaults when `id` is `None`
pub fn render(app: &Newsshare, id: Option<&str>, url: Option<&str>) -> Result<String> {
    let document = shared(Document::new(&app.config.title));
    let sync = app.synchronizer(document.clone());

    match id {
        Some(id) => {
            let posts = app.load_posts()?;
            let post = posts.require(id)?;
            let url = url.map(str::to_string).unwrap_or_else(|| app.post_url(id));
            sync.apply_post_metadata(post, &url);
        }
        None => sync.reset_post_metadata(),
    }

    let head = lock_document(&document).render_head();
    Ok(head)
}

pub fn run(app: &Newsshare, id: Option<&str>, url: Option<&str>) -> Result<()> {
    println!("{}", render(app, id, url)?);
    Ok(())
}
