//! Outbound messaging: WhatsApp and email provider clients plus the outbox
//! that enforces duplicate suppression and the provider rate limit.

mod email;
mod outbox;
mod whatsapp;

pub use email::{EmailError, ResendClient};
pub use outbox::{BulkReport, Outbox, OutboxError, SendOutcome};
pub use whatsapp::{WhatsAppClient, WhatsAppError};
