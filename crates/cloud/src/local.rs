//! Filesystem-backed blob store for local development.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::store::{BlobStore, BlobStoreError};

pub struct LocalBlobStore {
    base_dir: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(base_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), BlobStoreError> {
        // Object paths are single segments; anything else would escape the
        // base directory.
        if path.contains('/') || path.contains('\\') || path.contains("..") {
            return Err(BlobStoreError::Backend(format!(
                "Invalid object path '{path}'"
            )));
        }

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| BlobStoreError::Backend(e.to_string()))?;

        let file_path = self.base_dir.join(path);
        // create_new keeps the no-overwrite contract: an existing file is
        // a loud failure, not a silent replace.
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(BlobStoreError::AlreadyExists {
                    path: path.to_string(),
                });
            }
            Err(err) => return Err(BlobStoreError::Backend(err.to_string())),
        };

        file.write_all(&bytes)
            .await
            .map_err(|e| BlobStoreError::Backend(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| BlobStoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> Result<String, BlobStoreError> {
        if self.public_base_url.trim().is_empty() {
            return Err(BlobStoreError::PublicUrl(
                "No public base URL configured".to_string(),
            ));
        }
        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            path
        ))
    }
}
