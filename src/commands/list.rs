//! List loaded posts

use anyhow::Result;

use crate::helpers::today;
use crate::Newsshare;

/// Print every post with its date, id and title
pub fn run(app: &Newsshare) -> Result<()> {
    let posts = app.load_posts()?;
    let today = today();

    println!("Posts ({}):", posts.len());
    for post in posts.posts() {
        println!(
            "  {} - {} [{}]",
            post.display_date(today),
            post.title_or(&app.config.share.default_title),
            post.id.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
