//! Repository for the `cards` table.

use lantern_core::types::CardId;
use sqlx::PgPool;

use crate::models::card::{CardRecord, CreateCard};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, recipient_name, message, image_url, image_caption, sender_name, \
                       card_date, style, created_at";

/// Create/read operations for card records.
///
/// Cards are created exactly once and never mutated or deleted, so this
/// repository deliberately has no update or delete methods.
pub struct CardRepo;

impl CardRepo {
    /// Insert a new card, returning the created row with its store-assigned
    /// id. One network round trip; callers do not retry.
    pub async fn create(pool: &PgPool, input: &CreateCard) -> Result<CardRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (recipient_name, message, image_url, image_caption, sender_name, card_date, style)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'birthday'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CardRecord>(&query)
            .bind(&input.recipient_name)
            .bind(&input.message)
            .bind(&input.image_url)
            .bind(&input.image_caption)
            .bind(&input.sender_name)
            .bind(&input.card_date)
            .bind(&input.style)
            .fetch_one(pool)
            .await
    }

    /// Find a card by its id.
    pub async fn find_by_id(pool: &PgPool, id: CardId) -> Result<Option<CardRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, CardRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
