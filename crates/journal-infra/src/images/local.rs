//! Local filesystem image store.
//!
//! Files land in a single flat directory named `<unix-millis>-<original-name>`
//! and are addressed as `<url_prefix>/<file name>`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;

use journal_core::ports::{ImageStore, ImageStoreError};

/// URL prefix uploaded files are served under.
pub const DEFAULT_URL_PREFIX: &str = "/uploads";

/// Image store writing into a directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }

    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), ImageStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Path inside the store for a URL previously returned by `save`.
    pub fn path_for_url(&self, url: &str) -> Result<PathBuf, ImageStoreError> {
        let name = url.rsplit('/').next().unwrap_or_default();
        Ok(self.root.join(checked_name(name)?))
    }
}

/// Final path component of a client-supplied name.
///
/// Browsers may send full paths with either separator.
fn base_name(original: &str) -> &str {
    original.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default()
}

fn checked_name(name: &str) -> Result<&str, ImageStoreError> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ImageStoreError::InvalidName(name.to_string()));
    }
    Ok(name)
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        let name = checked_name(base_name(original_name))?;
        let file_name = format!("{}-{}", Utc::now().timestamp_millis(), name);

        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Image stored");
        Ok(format!("{}/{}", self.url_prefix, file_name))
    }

    async fn remove(&self, url: &str) -> Result<(), ImageStoreError> {
        let path = self.path_for_url(url)?;
        tokio::fs::remove_file(&path).await?;

        tracing::debug!(path = %path.display(), "Image removed");
        Ok(())
    }
}
