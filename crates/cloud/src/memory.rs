//! In-memory blob store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{BlobStore, BlobStoreError};

#[derive(Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), BlobStoreError> {
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(path) {
            return Err(BlobStoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        objects.insert(path.to_string(), bytes);
        Ok(())
    }

    fn public_url(&self, path: &str) -> Result<String, BlobStoreError> {
        Ok(format!("memory://{path}"))
    }
}
