//! Post loader - reads backend JSON exports from the posts directory

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::Post;
use crate::{Error, Result};

/// Posts loaded from disk, in file order
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// Create a store from posts already in memory
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Load every `*.json` file under `dir`
    ///
    /// A file may hold a single post or an array of posts. Posts without an
    /// id take the file stem. Unreadable files are skipped with a warning.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", dir);
            return Ok(Self::default());
        }

        let mut files: Vec<_> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_json_file(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();

        let mut posts = Vec::new();
        for path in files {
            match load_file(&path) {
                Ok(loaded) => posts.extend(loaded),
                Err(e) => {
                    tracing::warn!("Failed to load posts from {:?}: {}", path, e);
                }
            }
        }

        tracing::info!("Loaded {} posts from {:?}", posts.len(), dir);
        Ok(Self { posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find a post by id
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Find a post by id, failing with [`Error::PostNotFound`]
    pub fn require(&self, id: &str) -> Result<&Post> {
        self.get(id).ok_or_else(|| Error::PostNotFound(id.to_string()))
    }
}

fn load_file(path: &Path) -> Result<Vec<Post>> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let mut posts: Vec<Post> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    if posts.len() == 1 && posts[0].id.is_none() {
        posts[0].id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }

    Ok(posts)
}

fn is_json_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
