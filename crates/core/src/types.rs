/// Card identifiers are store-assigned UUIDs.
pub type CardId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
