/// All entity identifiers are server-assigned integers.
pub type DbId = i64;

/// All server timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
