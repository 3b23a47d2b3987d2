//! S3-backed blob store.

use async_trait::async_trait;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;

use crate::store::{BlobStore, BlobStoreError};

/// Cache-Control applied to uploaded card images.
const CACHE_CONTROL: &str = "max-age=3600";

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Build a store from the ambient AWS environment (credential chain,
    /// region).
    pub async fn from_env(
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, public_base_url)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BlobStoreError> {
        // `If-None-Match: *` is the conditional write keeping the
        // no-overwrite contract server-side.
        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .cache_control(CACHE_CONTROL)
            .if_none_match("*")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let collision = err
                    .as_service_error()
                    .and_then(|service| service.code())
                    .is_some_and(|code| code == "PreconditionFailed");
                if collision {
                    Err(BlobStoreError::AlreadyExists {
                        path: path.to_string(),
                    })
                } else {
                    tracing::error!(error = %aws_sdk_s3::error::DisplayErrorContext(&err), "S3 put failed");
                    Err(BlobStoreError::Backend(err.to_string()))
                }
            }
        }
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
