//! File-backed byte storage for the `/files/` routes.
//!
//! Names come straight from the request path, so every access goes through
//! [`FileStore::resolve`], which refuses anything that could climb out of
//! the root. There is no locking: concurrent writers to the same name race
//! and the last one wins.

use bytes::Bytes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("path traversal rejected: {0:?}")]
    Traversal(String),
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("file not found: {0}")]
    NotFound(#[source] io::Error),
    #[error("failed to write file: {0}")]
    Write(#[source] io::Error),
}

/// Reads and writes whole files under a fixed root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request file name to a path under the root.
    ///
    /// The name is cleaned lexically first (empty and `.` segments dropped,
    /// `..` cancels the segment before it). If the cleaned name still
    /// contains `..` it is rejected. The result never has an absolute
    /// component, so a leading `/` stays inside the root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let cleaned = clean(name);

        if cleaned.contains("..") {
            return Err(StorageError::Traversal(name.to_string()));
        }
        if cleaned.is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(cleaned))
    }

    pub async fn read(&self, name: &str) -> Result<Bytes, StorageError> {
        let path = self.resolve(name)?;
        let content = tokio::fs::read(&path).await.map_err(StorageError::NotFound)?;
        Ok(Bytes::from(content))
    }

    /// Creates or truncates the file and writes `content` to it.
    pub async fn write(&self, name: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(StorageError::Write)
    }
}

/// Lexical cleanup of a `/`-separated relative name.
fn clean(name: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}
