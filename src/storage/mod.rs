//! Local file storage for mirrored content
//!
//! All downloaded artifacts live under one output directory. The mapping
//! from URL to local path is deterministic, which is what makes the
//! cache-hit short-circuit possible: a URL whose mapped file already
//! exists is read from disk instead of fetched again.

use crate::url::{file_name_from_path, CanonicalUrl};
use crate::{MirrorError, UrlError};
use std::path::{Path, PathBuf};

/// Handle to the output directory of one crawl
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist yet
    ///
    /// An already-existing directory is success, matching the reference
    /// bootstrap behavior.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Maps a URL to its local path under the root
    ///
    /// The URL's path segments are mirrored as directories, so
    /// `http://host/a/b.html` maps to `<root>/a/b.html` and distinct URL
    /// paths never share a local path. Fails with
    /// `UrlError::NoFileInPath` when the URL path has no final segment.
    pub fn local_path(&self, url: &CanonicalUrl) -> Result<PathBuf, UrlError> {
        file_name_from_path(url.path())?;

        let mut path = self.root.clone();
        // Url parsing has already resolved `.` and `..`, so every segment
        // here is a literal name.
        for segment in url.path().split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }

        Ok(path)
    }

    /// Returns true if a file already exists at the given path
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Reads the bytes of an already-downloaded file
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, MirrorError> {
        tokio::fs::read(path).await.map_err(|e| MirrorError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Writes bytes to the given path, creating parent directories
    pub async fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), MirrorError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MirrorError::Write {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| MirrorError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
