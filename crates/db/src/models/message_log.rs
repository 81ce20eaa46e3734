//! Outbound message log model.

use maktab_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full message log row from the `message_log` table.
///
/// Every outbound attempt lands here, including suppressed ones; the
/// duplicate-send window is computed from this table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MessageLog {
    pub id: DbId,
    pub recipient: String,
    pub channel: String,
    pub template: String,
    pub status: String,
    pub error: Option<String>,
    pub sent_at: Timestamp,
}
