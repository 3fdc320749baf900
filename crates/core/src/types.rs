/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Document identifier (`id`) as stored in the container.
pub type RecordId = String;
