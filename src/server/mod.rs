//! Preview server rendering post pages with share metadata in the head
//!
//! Link-preview crawlers read Open Graph tags without running scripts, so
//! the post page is served with the metadata already applied.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{Post, PostStore};
use crate::helpers::{encode_url, html_escape, url_for};
use crate::meta::{lock_document, shared, Document, MetaTagSynchronizer};
use crate::share::{format_share_content, ShareDialog};
use crate::Newsshare;

/// Server state
struct ServerState {
    app: Newsshare,
    posts: PostStore,
}

/// Build the router for a set of posts
pub fn router(app: Newsshare, posts: PostStore) -> Router {
    let state = Arc::new(ServerState { app, posts });

    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:id", get(post_handler))
        .route("/api/posts/:id/share", get(share_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(app: &Newsshare, ip: &str, port: u16) -> Result<()> {
    let posts = app.load_posts()?;
    let router = router(app.clone(), posts);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let config = &state.app.config;
    let items: Vec<String> = state
        .posts
        .posts()
        .iter()
        .filter_map(|post| {
            let id = post.id.as_deref()?;
            Some(format!(
                r#"<li><a href="{}">{}</a></li>"#,
                html_escape(&url_for(config, &format!("posts/{}", encode_url(id)))),
                html_escape(post.title_or(&config.share.default_title))
            ))
        })
        .collect();

    let body = format!(
        "<h1>{}</h1>\n<ul>\n{}\n</ul>",
        html_escape(&config.title),
        items.join("\n")
    );
    Html(render_page(&default_head(&state.app), &body))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match state.posts.get(&id) {
        Some(post) => {
            let url = state.app.post_url(&id);
            Html(render_post_page(&state.app, post, &url)).into_response()
        }
        None => {
            tracing::debug!("Post not found: {}", id);
            let body = "<h1>Post not found.</h1>";
            (
                StatusCode::NOT_FOUND,
                Html(render_page(&default_head(&state.app), body)),
            )
                .into_response()
        }
    }
}

async fn share_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match state.posts.get(&id) {
        Some(post) => {
            let url = state.app.post_url(&id);
            Json(format_share_content(&state.app.config, Some(post), &url)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Post not found: {}", id) })),
        )
            .into_response(),
    }
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Head of a page showing no particular post
fn default_head(app: &Newsshare) -> String {
    let document = shared(Document::new(&app.config.title));
    app.synchronizer(document.clone()).reset_post_metadata();
    let head = lock_document(&document).render_head();
    head
}

/// Full HTML page for a post, with its share metadata in the head
pub fn render_post_page(app: &Newsshare, post: &Post, url: &str) -> String {
    let config: &SiteConfig = &app.config;
    let document = shared(Document::new(&config.title));
    let sync = app.synchronizer(document.clone());
    sync.apply_post_metadata(post, url);
    let head = lock_document(&document).render_head();

    let title = post.title_or(&config.share.default_title);
    let mut byline = format!("By {}", html_escape(post.author_or(&config.author)));
    if let Some(updated) = post.updated_date() {
        byline.push_str(&format!(" | Last Updated: {}", updated));
    }

    let thumbnail = post
        .thumbnail()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="Post Thumbnail">"#,
                html_escape(src)
            )
        })
        .unwrap_or_default();

    let dialog = ShareDialog::new(
        MetaTagSynchronizer::detached(Arc::clone(&app.config)),
        post.clone(),
        url,
    );
    let links: Vec<String> = dialog
        .view()
        .buttons
        .iter()
        .map(|b| {
            format!(
                r#"<a class="share-{}" href="{}" rel="noopener" target="_blank">{}</a>"#,
                b.label.to_lowercase(),
                html_escape(&b.href),
                b.label
            )
        })
        .collect();

    let body = format!(
        "<article>\n<h1>{}</h1>\n<p class=\"byline\">{}</p>\n{}\n<div class=\"post-content\">{}</div>\n</article>\n<nav class=\"share\">\n{}\n</nav>",
        html_escape(title),
        byline,
        thumbnail,
        post.content_html(),
        links.join("\n")
    );

    tracing::debug!("Rendered post page {:?}", title);
    render_page(&head, &body)
}

fn render_page(head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        head, body
    )
}
