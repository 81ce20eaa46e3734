//! Repository for the `message_log` table.

use sqlx::PgPool;

use crate::models::message_log::MessageLog;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, recipient, channel, template, status, error, sent_at";

/// Provides operations for the outbound message log.
pub struct MessageLogRepo;

impl MessageLogRepo {
    /// Record one delivery attempt (sent, failed, or suppressed).
    pub async fn record(
        pool: &PgPool,
        recipient: &str,
        channel: &str,
        template: &str,
        status: &str,
        error: Option<&str>,
    ) -> Result<MessageLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO message_log (recipient, channel, template, status, error)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MessageLog>(&query)
            .bind(recipient)
            .bind(channel)
            .bind(template)
            .bind(status)
            .bind(error)
            .fetch_one(pool)
            .await
    }

    /// Whether the same template was successfully sent to the same recipient
    /// within the last `window_hours`. Drives duplicate suppression, checked
    /// before any provider call.
    pub async fn sent_within(
        pool: &PgPool,
        recipient: &str,
        template: &str,
        window_hours: i32,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM message_log
                WHERE recipient = $1 AND template = $2 AND status = 'SENT'
                  AND sent_at > NOW() - make_interval(hours => $3)
             )",
        )
        .bind(recipient)
        .bind(template)
        .bind(window_hours)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Most recent log entries.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<MessageLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM message_log
             ORDER BY sent_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, MessageLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
