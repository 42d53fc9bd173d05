use async_trait::async_trait;

/// Image store - where uploaded files live and how they are addressed.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a name derived from `original_name`.
    ///
    /// Returns the URL the stored file is served under.
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError>;

    /// Remove the file a URL returned by [`ImageStore::save`] points at.
    async fn remove(&self, url: &str) -> Result<(), ImageStoreError>;
}

/// Image store errors.
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File system operation failed: {0}")]
    Io(#[from] std::io::Error),
}
