//! Share dialog: binds share text and head metadata to the dialog lifecycle

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{
    format_share_content, share_link, Clipboard, LinkParams, ShareChannel, ShareContent,
};
use crate::content::Post;
use crate::helpers::plain_text;
use crate::meta::{lock_document, BodyStyle, MetaTagSynchronizer};

/// Whether the dialog is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
}

/// What dismissed the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Backdrop,
}

/// A provider button in the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareButton {
    pub channel: ShareChannel,
    pub label: &'static str,
    pub href: String,
}

/// Everything the dialog renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub state: DialogState,
    pub title: String,
    pub preview: String,
    pub image: Option<String>,
    pub byline: String,
    pub buttons: Vec<ShareButton>,
    pub copied: bool,
    pub copy_label: &'static str,
}

/// Transient "copied" flag that hides itself after a delay
///
/// Each show bumps the generation, so an older pending hide does nothing.
#[derive(Debug, Default)]
struct CopyIndicator {
    visible: AtomicBool,
    generation: AtomicU64,
}

impl CopyIndicator {
    fn show(self: &Arc<Self>, duration: Duration) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.visible.store(true, Ordering::SeqCst);

        let indicator = Arc::clone(self);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    if indicator.generation.load(Ordering::SeqCst) == token {
                        indicator.visible.store(false, Ordering::SeqCst);
                    }
                });
            }
            Err(_) => {
                tracing::debug!("No async runtime, copied indicator stays until the next copy");
            }
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// The share dialog for one post
///
/// `Closed -> Open` on a share action, `Open -> Closed` on close. Opening
/// applies the post's head metadata and suppresses body scrolling; closing
/// restores the exact body style seen at open and schedules a reset of the
/// head metadata.
pub struct ShareDialog {
    sync: MetaTagSynchronizer,
    post: Post,
    url: String,
    state: DialogState,
    saved_style: Option<BodyStyle>,
    applied_title: Option<String>,
    reset_generation: Arc<AtomicU64>,
    copied: Arc<CopyIndicator>,
}

impl ShareDialog {
    pub fn new(sync: MetaTagSynchronizer, post: Post, url: impl Into<String>) -> Self {
        Self {
            sync,
            post,
            url: url.into(),
            state: DialogState::Closed,
            saved_style: None,
            applied_title: None,
            reset_generation: Arc::new(AtomicU64::new(0)),
            copied: Arc::new(CopyIndicator::default()),
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the "copied" indicator is showing
    pub fn copied(&self) -> bool {
        self.copied.is_visible()
    }

    /// Share text for every channel
    pub fn share_content(&self) -> ShareContent {
        format_share_content(self.sync.config(), Some(&self.post), &self.url)
    }

    fn title(&self) -> &str {
        self.post.title_or(&self.sync.config().share.default_title)
    }

    /// Open the dialog. Opening an open dialog does nothing.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }

        // invalidates a reset still pending from an earlier close
        self.reset_generation.fetch_add(1, Ordering::SeqCst);

        if let Some(document) = self.sync.document() {
            let mut doc = lock_document(document);
            let saved = doc.body_style.clone();
            let overflow_x = if saved.overflow_x.is_empty() {
                "hidden".to_string()
            } else {
                saved.overflow_x.clone()
            };
            doc.body_style = BodyStyle {
                overflow: "hidden".to_string(),
                overflow_x,
            };
            self.saved_style = Some(saved);
        }

        if !self.url.is_empty() {
            let metadata = self.sync.post_metadata(&self.post, &self.url);
            self.sync.apply_post_metadata(&self.post, &self.url);
            self.applied_title = Some(metadata.title);
        }

        self.state = DialogState::Open;
        tracing::debug!("Opened share dialog for {:?}", self.title());
    }

    /// Close the dialog. Closing a closed dialog does nothing.
    pub fn close(&mut self, reason: CloseReason) {
        if !self.is_open() {
            return;
        }

        if let (Some(document), Some(saved)) = (self.sync.document(), self.saved_style.take()) {
            lock_document(document).body_style = saved;
        }

        self.state = DialogState::Closed;
        tracing::debug!("Closed share dialog ({:?})", reason);
        self.schedule_reset();
    }

    /// Restore site metadata once the restore delay has passed
    ///
    /// The reset is skipped if the dialog was reopened meanwhile or if the
    /// document title no longer is the one this dialog set, so a later
    /// synchronization from elsewhere wins.
    fn schedule_reset(&mut self) {
        let Some(title) = self.applied_title.take() else {
            return;
        };

        let sync = self.sync.clone();
        let generation = Arc::clone(&self.reset_generation);
        let token = generation.load(Ordering::SeqCst);
        let restore = move || {
            if generation.load(Ordering::SeqCst) != token {
                return;
            }
            let still_ours = sync
                .document()
                .map(|d| lock_document(d).title() == title)
                .unwrap_or(false);
            if still_ours {
                sync.reset_post_metadata();
            }
        };

        let delay = Duration::from_millis(self.sync.config().share.title_restore_ms);
        if delay.is_zero() {
            restore();
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    restore();
                });
            }
            Err(_) => {
                tracing::debug!("No async runtime, restoring metadata immediately");
                restore();
            }
        }
    }

    /// Text placed on the clipboard: `copy`, then `whatsapp`, then title and URL
    pub fn copy_text(&self) -> String {
        let content = self.share_content();
        content
            .copy
            .or(content.whatsapp)
            .unwrap_or_else(|| format!("{}\n\n{}", self.title(), self.url))
    }

    /// Copy the share text; on success show the "copied" indicator for a while
    ///
    /// Failures are logged and reported as `false`; they never propagate.
    pub async fn copy_to_clipboard(&self, clipboard: &dyn Clipboard) -> bool {
        let text = self.copy_text();
        match clipboard.write_text(&text).await {
            Ok(()) => {
                let duration =
                    Duration::from_millis(self.sync.config().share.copied_indicator_ms);
                self.copied.show(duration);
                true
            }
            Err(e) => {
                tracing::error!("Failed to copy: {}", e);
                false
            }
        }
    }

    /// Provider link for `channel`; following it does not change dialog state
    pub fn share_link(&self, channel: ShareChannel) -> Option<String> {
        let config = self.sync.config();
        let content = self.share_content();
        let title = self.title();

        let text = match channel {
            ShareChannel::Whatsapp => content
                .whatsapp
                .unwrap_or_else(|| format!("{} - {}", title, self.url)),
            ShareChannel::Twitter => content.twitter.unwrap_or_else(|| title.to_string()),
            ShareChannel::Telegram => content.telegram.unwrap_or_else(|| title.to_string()),
            ShareChannel::Email => content
                .email
                .unwrap_or_else(|| format!("Check out this article: {}\n\n{}", title, self.url)),
            ShareChannel::Copy => return None,
        };
        let subject = format!("📰 {} - {}", title, config.title);

        share_link(
            channel,
            &self.url,
            &LinkParams {
                text: &text,
                subject: &subject,
                hashtags: &config.share.hashtags,
            },
        )
    }

    /// Data to render the dialog
    pub fn view(&self) -> DialogView {
        let config = self.sync.config();
        let copied = self.copied();

        DialogView {
            state: self.state,
            title: self.title().to_string(),
            preview: plain_text(self.post.content_html(), config.share.preview_length),
            image: self.post.thumbnail().map(str::to_string),
            byline: format!("By {}", self.post.author_or(&config.author)),
            buttons: ShareChannel::PROVIDERS
                .iter()
                .filter_map(|&channel| {
                    self.share_link(channel).map(|href| ShareButton {
                        channel,
                        label: channel.label(),
                        href,
                    })
                })
                .collect(),
            copied,
            copy_label: if copied { "Copied!" } else { "Copy share text" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Author;
    use crate::meta::{shared, Document, SharedDocument};
    use crate::share::MemoryClipboard;
    use std::future::Future;
    use std::task::{Context, Poll, Wake, Waker};

    const URL: &str = "https://example.com/p/1";

    fn config_with_delay(title_restore_ms: u64) -> Arc<SiteConfig> {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.share.title_restore_ms = title_restore_ms;
        Arc::new(config)
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

    fn dialog(config: Arc<SiteConfig>) -> (ShareDialog, SharedDocument) {
        let mut doc = Document::new("Newsroom");
        doc.body_style.overflow = "auto".to_string();
        let document = shared(doc);
        let sync = MetaTagSynchronizer::new(config, document.clone());
        (ShareDialog::new(sync, budget_post(), URL), document)
    }

    #[test]
    fn test_open_close_restores_body_style() {
        let (mut dialog, document) = dialog(config_with_delay(0));
        assert_eq!(dialog.state(), DialogState::Closed);

        dialog.open();
        assert!(dialog.is_open());
        {
            let doc = lock_document(&document);
            assert_eq!(doc.body_style.overflow, "hidden");
            assert_eq!(doc.body_style.overflow_x, "hidden");
            assert_eq!(doc.title(), "Budget 2025 - Newsroom");
        }

        // a second open must not capture the suppressed style
        dialog.open();
        dialog.close(CloseReason::Backdrop);

        let doc = lock_document(&document);
        assert_eq!(doc.body_style.overflow, "auto");
        assert_eq!(doc.body_style.overflow_x, "");
        assert_eq!(doc.title(), "Newsroom");
        assert_eq!(doc.meta_content("og:type"), Some("website"));
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let (mut dialog, document) = dialog(config_with_delay(0));
        let before = lock_document(&document).clone();
        dialog.close(CloseReason::Button);
        assert_eq!(*lock_document(&document), before);
    }

    #[test]
    fn test_link_does_not_change_state() {
        let (mut dialog, _) = dialog(config_with_delay(0));
        dialog.open();
        let link = dialog.share_link(ShareChannel::Telegram).unwrap();
        assert!(link.starts_with("https://t.me/share/url?url="));
        assert!(dialog.is_open());
    }

    #[test]
    fn test_view() {
        let (dialog, _) = dialog(config_with_delay(0));
        let view = dialog.view();
        assert_eq!(view.title, "Budget 2025");
        assert_eq!(view.preview, "Big news today");
        assert_eq!(view.byline, "By A. Sharma");
        assert_eq!(view.buttons.len(), 4);
        assert_eq!(view.copy_label, "Copy share text");
        assert!(view.buttons[3].href.starts_with("mailto:?subject=%F0%9F%93%B0%20Budget%202025"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_indicator_reverts() {
        let (dialog, _) = dialog(config_with_delay(0));
        let clipboard = MemoryClipboard::new();

        assert!(dialog.copy_to_clipboard(&clipboard).await);
        assert_eq!(clipboard.contents(), dialog.share_content().copy);
        assert!(dialog.copied());
        assert_eq!(dialog.view().copy_label, "Copied!");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(dialog.copied());

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(!dialog.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_again_extends_indicator() {
        let (dialog, _) = dialog(config_with_delay(0));
        let clipboard = MemoryClipboard::new();

        dialog.copy_to_clipboard(&clipboard).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        dialog.copy_to_clipboard(&clipboard).await;

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(dialog.copied());
    }

    #[tokio::test]
    async fn test_copy_failure_shows_no_indicator() {
        let (dialog, _) = dialog(config_with_delay(0));
        let clipboard = MemoryClipboard::rejecting();

        assert!(!dialog.copy_to_clipboard(&clipboard).await);
        assert!(!dialog.copied());
        assert_eq!(dialog.view().copy_label, "Copy share text");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_reset_after_close() {
        let (mut dialog, document) = dialog(config_with_delay(1000));
        dialog.open();
        dialog.close(CloseReason::Button);
        assert_eq!(lock_document(&document).title(), "Budget 2025 - Newsroom");

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert_eq!(lock_document(&document).title(), "Newsroom");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_cancels_pending_reset() {
        let (mut dialog, document) = dialog(config_with_delay(1000));
        dialog.open();
        dialog.close(CloseReason::Button);
        dialog.open();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert_eq!(lock_document(&document).title(), "Budget 2025 - Newsroom");
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_sync_wins_over_pending_reset() {
        let (mut dialog, document) = dialog(config_with_delay(1000));
        dialog.open();
        dialog.close(CloseReason::Button);

        let sync = MetaTagSynchronizer::new(config_with_delay(1000), document.clone());
        sync.apply_post_metadata(&Post::new("Monsoon update", "<p>Rain</p>"), URL);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert_eq!(lock_document(&document).title(), "Monsoon update - Newsroom");
    }

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    /// Drive a future to completion on the current thread, outside any runtime
    fn block_on<F: Future>(fut: F) -> F::Output {
        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        let mut fut = std::pin::pin!(fut);
        loop {
            if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    #[test]
    fn test_copy_without_runtime() {
        let (dialog, _) = dialog(config_with_delay(0));
        let clipboard = MemoryClipboard::new();

        assert!(block_on(dialog.copy_to_clipboard(&clipboard)));
        assert_eq!(clipboard.contents(), dialog.share_content().copy);
        assert!(dialog.copied());
        assert_eq!(dialog.view().copy_label, "Copied!");
    }

    #[test]
    fn test_detached_dialog_open_close() {
        let sync = MetaTagSynchronizer::detached(config_with_delay(1000));
        let mut dialog = ShareDialog::new(sync, budget_post(), URL);
        assert!(dialog.sync.document().is_none());

        dialog.open();
        assert!(dialog.is_open());
        assert_eq!(dialog.view().state, DialogState::Open);
        assert!(dialog.share_link(ShareChannel::Whatsapp).is_some());

        dialog.close(CloseReason::Button);
        assert_eq!(dialog.state(), DialogState::Closed);
        dialog.close(CloseReason::Backdrop);
        assert_eq!(dialog.state(), DialogState::Closed);

        dialog.open();
        assert!(dialog.is_open());
    }

    #[test]
    fn test_copy_text_fallback() {
        let (dialog, _) = dialog(config_with_delay(0));
        assert_eq!(Some(dialog.copy_text()), dialog.share_content().copy);
    }
}
