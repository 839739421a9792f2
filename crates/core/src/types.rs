/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Media items are identified by UUIDs (v7, time-ordered).
pub type ItemId = uuid::Uuid;
