//! Clipboard write primitive

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard write failures
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("No clipboard available: {0}")]
    Unavailable(String),

    #[error("Clipboard rejected the write: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something text can be copied to
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard, optionally refusing every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail
    pub fn rejecting() -> Self {
        Self {
            contents: Mutex::new(None),
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::Rejected("write not permitted".to_string()));
        }
        *self
            .contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

/// The desktop clipboard, reached through the platform's copy command
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
fn copy_command() -> Result<Command, ClipboardError> {
    Ok(Command::new("pbcopy"))
}

#[cfg(target_os = "windows")]
fn copy_command() -> Result<Command, ClipboardError> {
    Ok(Command::new("clip"))
}

#[cfg(target_os = "linux")]
fn copy_command() -> Result<Command, ClipboardError> {
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Ok(Command::new("wl-copy"))
    } else if std::env::var_os("DISPLAY").is_some() {
        let mut cmd = Command::new("xclip");
        cmd.args(["-selection", "clipboard"]);
        Ok(cmd)
    } else {
        Err(ClipboardError::Unavailable("no graphical session".to_string()))
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
fn copy_command() -> Result<Command, ClipboardError> {
    Err(ClipboardError::Unavailable("unsupported platform".to_string()))
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = copy_command()?
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Rejected(format!("copy command exited with {}", status)))
        }
    }
}
