//! The outbox: every outbound message goes through here so duplicate
//! suppression, logging, and the provider rate limit apply uniformly.
//!
//! Bulk sends are sequential and best-effort: a mid-run failure leaves
//! earlier sends committed and later recipients still attempted; the caller
//! gets aggregate counts, not a rollback.

use std::time::Duration;

use maktab_core::contact::normalize_phone;
use maktab_core::messaging::{
    CHANNEL_EMAIL, CHANNEL_WHATSAPP, DELIVERY_FAILED, DELIVERY_SENT, DELIVERY_SUPPRESSED,
};
use maktab_db::repositories::MessageLogRepo;
use maktab_db::DbPool;
use serde::Serialize;

use crate::email::{EmailError, ResendClient};
use crate::whatsapp::{WhatsAppClient, WhatsAppError};

/// Errors surfaced to callers of the outbox.
#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("'{0}' is not a valid phone number")]
    InvalidRecipient(String),

    /// The same template already went to this recipient inside the window.
    #[error("Message already sent to this recipient recently")]
    AlreadySent,

    #[error(transparent)]
    WhatsApp(#[from] WhatsAppError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What happened to a single accepted send.
#[derive(Debug, Serialize)]
pub struct SendOutcome {
    pub recipient: String,
    pub status: &'static str,
}

/// Aggregate counts for a bulk run.
#[derive(Debug, Default, Serialize)]
pub struct BulkReport {
    pub sent: u32,
    pub suppressed: u32,
    pub failed: u32,
}

/// Outbound message coordinator.
pub struct Outbox {
    pool: DbPool,
    whatsapp: WhatsAppClient,
    email: ResendClient,
    /// Fixed pause between bulk iterations, for the provider rate limit.
    send_delay: Duration,
    /// Window within which a repeated (recipient, template) send is refused.
    dedupe_window_hours: i32,
}

impl Outbox {
    pub fn new(
        pool: DbPool,
        whatsapp: WhatsAppClient,
        email: ResendClient,
        send_delay: Duration,
        dedupe_window_hours: i32,
    ) -> Self {
        Self {
            pool,
            whatsapp,
            email,
            send_delay,
            dedupe_window_hours,
        }
    }

    /// Send one templated WhatsApp message.
    ///
    /// The duplicate window is checked against the message log before any
    /// provider call; a repeat inside the window is logged as suppressed and
    /// rejected with [`OutboxError::AlreadySent`].
    pub async fn send_whatsapp(
        &self,
        to_raw: &str,
        template: &str,
        body_params: &[String],
    ) -> Result<SendOutcome, OutboxError> {
        let recipient = normalize_phone(to_raw)
            .ok_or_else(|| OutboxError::InvalidRecipient(to_raw.to_string()))?;

        if MessageLogRepo::sent_within(&self.pool, &recipient, template, self.dedupe_window_hours)
            .await?
        {
            MessageLogRepo::record(
                &self.pool,
                &recipient,
                CHANNEL_WHATSAPP,
                template,
                DELIVERY_SUPPRESSED,
                None,
            )
            .await?;
            tracing::info!(%recipient, template, "Duplicate WhatsApp send suppressed");
            return Err(OutboxError::AlreadySent);
        }

        match self.whatsapp.send_template(&recipient, template, body_params).await {
            Ok(()) => {
                MessageLogRepo::record(
                    &self.pool,
                    &recipient,
                    CHANNEL_WHATSAPP,
                    template,
                    DELIVERY_SENT,
                    None,
                )
                .await?;
                Ok(SendOutcome {
                    recipient,
                    status: DELIVERY_SENT,
                })
            }
            Err(err) => {
                MessageLogRepo::record(
                    &self.pool,
                    &recipient,
                    CHANNEL_WHATSAPP,
                    template,
                    DELIVERY_FAILED,
                    Some(&err.to_string()),
                )
                .await?;
                Err(err.into())
            }
        }
    }

    /// Send one email. No duplicate window; every attempt is logged.
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        template: &str,
    ) -> Result<SendOutcome, OutboxError> {
        match self.email.send(to, subject, html).await {
            Ok(()) => {
                MessageLogRepo::record(&self.pool, to, CHANNEL_EMAIL, template, DELIVERY_SENT, None)
                    .await?;
                Ok(SendOutcome {
                    recipient: to.to_string(),
                    status: DELIVERY_SENT,
                })
            }
            Err(err) => {
                MessageLogRepo::record(
                    &self.pool,
                    to,
                    CHANNEL_EMAIL,
                    template,
                    DELIVERY_FAILED,
                    Some(&err.to_string()),
                )
                .await?;
                Err(err.into())
            }
        }
    }

    /// Send a template to many recipients sequentially.
    ///
    /// Sleeps the configured delay between iterations. Failures are counted,
    /// not propagated.
    pub async fn send_whatsapp_bulk(
        &self,
        recipients: &[String],
        template: &str,
        body_params: &[String],
    ) -> BulkReport {
        let mut report = BulkReport::default();

        for (index, recipient) in recipients.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.send_delay).await;
            }

            match self.send_whatsapp(recipient, template, body_params).await {
                Ok(_) => report.sent += 1,
                Err(OutboxError::AlreadySent) => report.suppressed += 1,
                Err(err) => {
                    tracing::warn!(recipient = %recipient, template, error = %err, "Bulk send failure");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            template,
            sent = report.sent,
            suppressed = report.suppressed,
            failed = report.failed,
            "Bulk WhatsApp run finished",
        );
        report
    }
}
