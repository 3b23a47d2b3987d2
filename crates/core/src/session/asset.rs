//! Pending image selection for an authoring session.

use std::fmt;

/// A revocable local preview resource backing a selected image.
///
/// Created when a file is selected; revoked when the selection is
/// replaced, cleared, the card is created, or the session ends. Revoking a
/// handle that was never created, or revoking twice, is a no-op.
pub trait PreviewHandle: Send + Sync {
    fn revoke(&mut self);
}

/// An image selected for upload but not yet uploaded.
///
/// Owned solely by the authoring session.
pub struct PendingAsset {
    file_name: String,
    caption_draft: String,
    preview: Option<Box<dyn PreviewHandle>>,
}

impl PendingAsset {
    pub fn new(file_name: impl Into<String>, preview: Option<Box<dyn PreviewHandle>>) -> Self {
        Self {
            file_name: file_name.into(),
            caption_draft: String::new(),
            preview,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared extension, from the file name (`photo.jpg` -> `jpg`).
    pub fn extension(&self) -> Option<&str> {
        self.file_name.rsplit_once('.').map(|(_, ext)| ext)
    }

    pub fn caption_draft(&self) -> &str {
        &self.caption_draft
    }

    pub fn set_caption_draft(&mut self, caption: impl Into<String>) {
        self.caption_draft = caption.into();
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Release the preview resource. Idempotent.
    pub fn revoke_preview(&mut self) {
        if let Some(mut preview) = self.preview.take() {
            preview.revoke();
        }
    }
}

impl Drop for PendingAsset {
    fn drop(&mut self) {
        self.revoke_preview();
    }
}

impl fmt::Debug for PendingAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAsset")
            .field("file_name", &self.file_name)
            .field("caption_draft", &self.caption_draft)
            .field("has_preview", &self.preview.is_some())
            .finish()
    }
}
