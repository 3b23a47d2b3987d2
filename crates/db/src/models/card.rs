//! Card record entity and its insert DTO.

use lantern_core::card::ValidCard;
use lantern_core::types::{CardId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cards` table.
///
/// Immutable once created: the repository exposes no update or delete.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CardRecord {
    pub id: CardId,
    pub recipient_name: String,
    pub message: String,
    pub image_url: Option<String>,
    /// Meaningful only alongside `image_url`; the store enforces the
    /// pairing with a CHECK constraint as well.
    pub image_caption: Option<String>,
    pub sender_name: String,
    pub card_date: String,
    pub style: String,
    pub created_at: Timestamp,
}

impl CardRecord {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// DTO for inserting a new card.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCard {
    pub recipient_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub image_caption: Option<String>,
    pub sender_name: String,
    pub card_date: String,
    /// Defaults to `birthday` when absent.
    pub style: Option<String>,
}

impl From<ValidCard> for CreateCard {
    fn from(valid: ValidCard) -> Self {
        Self {
            recipient_name: valid.recipient_name,
            message: valid.message,
            image_url: valid.image_url,
            image_caption: valid.image_caption,
            sender_name: valid.sender_name,
            card_date: valid.card_date,
            style: Some(valid.style.name().to_string()),
        }
    }
}
