//! Blob storage providers and the image upload pipeline.
//!
//! The record store never sees raw image bytes: a selected image is
//! written to a blob store under a collision-resistant path and the
//! resulting public URL is what gets persisted on the card record.

mod local;
mod memory;
mod path;
mod pipeline;
mod s3;
mod store;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use path::object_path;
pub use pipeline::{upload_image, ImageUpload, PublicUrl, UploadError};
pub use s3::S3BlobStore;
pub use store::{BlobStore, BlobStoreError};
