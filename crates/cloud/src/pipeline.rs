//! The image upload pipeline.
//!
//! Turns a locally selected image into a durable, publicly addressable
//! URL. Upload success is a precondition for record creation: any failure
//! here aborts the submission before a record is ever persisted.

use crate::path::object_path;
use crate::store::{BlobStore, BlobStoreError};

/// Declared extensions accepted for upload.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// An image selected for upload: raw bytes plus the declared extension
/// (taken from the original file name).
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub extension: String,
}

/// A publicly fetchable URL for an uploaded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrl(String);

impl PublicUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PublicUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Unsupported image extension '{0}'")]
    UnsupportedExtension(String),

    #[error("File does not look like a supported image")]
    NotAnImage,

    #[error(transparent)]
    Store(#[from] BlobStoreError),
}

/// Upload an image and resolve its public URL.
///
/// Exactly one blob is written per successful call; there are no implicit
/// retries. The image header is sniffed before any store interaction so
/// non-image payloads never reach the blob store.
pub async fn upload_image(
    store: &dyn BlobStore,
    upload: ImageUpload,
) -> Result<PublicUrl, UploadError> {
    if upload.bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }

    let extension = upload
        .extension
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedExtension(upload.extension));
    }

    let format = image::guess_format(&upload.bytes).map_err(|_| UploadError::NotAnImage)?;
    let content_type = format.to_mime_type();

    // Header-only dimension read; purely informational.
    let dimensions = image::ImageReader::new(std::io::Cursor::new(upload.bytes.as_slice()))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());
    if let Some((width, height)) = dimensions {
        tracing::debug!(width, height, content_type, "Accepted upload image");
    }

    let path = object_path(&extension);
    store.put(&path, upload.bytes, content_type).await?;
    let url = store.public_url(&path)?;
    tracing::info!(path = %path, url = %url, "Image uploaded");
    Ok(PublicUrl(url))
}
