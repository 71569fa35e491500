//! Library error types

use thiserror::Error;

/// Errors raised while loading configuration or posts
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Post parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Post not found: {0}")]
    PostNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
