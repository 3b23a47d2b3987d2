//! Card record model and draft validation.
//!
//! A draft is valid iff the four required text fields are non-empty after
//! trimming and a caption only accompanies an image. Validation is pure,
//! deterministic, and idempotent so callers can re-run it freely to drive
//! live form-validity indicators.

use serde::Serialize;

use crate::theme::CardStyle;

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

/// The four required text fields of a card draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    RecipientName,
    Message,
    SenderName,
    CardDate,
}

impl RequiredField {
    /// Stable snake_case name used in error payloads and form markup.
    pub fn name(self) -> &'static str {
        match self {
            Self::RecipientName => "recipient_name",
            Self::Message => "message",
            Self::SenderName => "sender_name",
            Self::CardDate => "card_date",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Validation error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field '{0}' must be non-empty")]
    MissingField(RequiredField),

    #[error("An image caption requires an image")]
    CaptionWithoutImage,
}

// ---------------------------------------------------------------------------
// Draft and validated card
// ---------------------------------------------------------------------------

/// Authoring form state for a card, prior to validation.
///
/// `image_url` is filled in only after a successful upload; during editing
/// it stays `None` and the selected file lives in the session's pending
/// asset.
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub recipient_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub image_caption: Option<String>,
    pub sender_name: String,
    pub card_date: String,
    pub style: CardStyle,
}

/// A draft that has passed validation, ready to persist.
///
/// Field values are kept exactly as entered; trimming is a validity check,
/// not a normalization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCard {
    pub recipient_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub image_caption: Option<String>,
    pub sender_name: String,
    pub card_date: String,
    pub style: CardStyle,
}

impl CardDraft {
    /// Validate the draft into a [`ValidCard`].
    ///
    /// No network or storage side effects. Required fields are checked in
    /// form order so the reported error matches the first offending input.
    pub fn validate(&self) -> Result<ValidCard, ValidationError> {
        require(RequiredField::RecipientName, &self.recipient_name)?;
        require(RequiredField::Message, &self.message)?;
        require(RequiredField::SenderName, &self.sender_name)?;
        require(RequiredField::CardDate, &self.card_date)?;

        if self.image_caption.is_some() && self.image_url.is_none() {
            return Err(ValidationError::CaptionWithoutImage);
        }

        Ok(ValidCard {
            recipient_name: self.recipient_name.clone(),
            message: self.message.clone(),
            image_url: self.image_url.clone(),
            image_caption: self.image_caption.clone(),
            sender_name: self.sender_name.clone(),
            card_date: self.card_date.clone(),
            style: self.style,
        })
    }

    /// True when the draft would validate; drives submit-button enablement.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Check a single required field for non-emptiness after trimming.
fn require(field: RequiredField, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
