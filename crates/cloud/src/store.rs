//! The blob store provider trait.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    /// A blob already exists at the target path. Overwrite is disabled by
    /// contract, so path collisions fail loudly instead of silently
    /// clobbering data.
    #[error("Blob already exists at path '{path}'")]
    AlreadyExists { path: String },

    #[error("Blob store write failed: {0}")]
    Backend(String),

    #[error("Could not resolve a public URL: {0}")]
    PublicUrl(String),
}

/// Durable storage for binary assets, addressable by path and resolvable
/// to a publicly fetchable URL.
///
/// Object paths are single path segments generated by
/// [`crate::object_path`]; uniqueness is the caller's responsibility.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a blob at `path`.
    ///
    /// MUST fail with [`BlobStoreError::AlreadyExists`] if the path is
    /// already occupied.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), BlobStoreError>;

    /// Resolve the publicly fetchable URL for `path`.
    fn public_url(&self, path: &str) -> Result<String, BlobStoreError>;
}
