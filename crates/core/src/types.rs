/// Database primary key type; every table uses PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are UTC everywhere; local rendering is a client concern.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
