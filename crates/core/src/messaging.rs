//! Outbound message channels and delivery statuses.

pub const CHANNEL_WHATSAPP: &str = "WHATSAPP";
pub const CHANNEL_EMAIL: &str = "EMAIL";
pub const VALID_CHANNELS: &[&str] = &[CHANNEL_WHATSAPP, CHANNEL_EMAIL];

/// The message went out to the provider.
pub const DELIVERY_SENT: &str = "SENT";
/// The provider rejected the message or the request failed.
pub const DELIVERY_FAILED: &str = "FAILED";
/// Suppressed before any provider call (duplicate within the window).
pub const DELIVERY_SUPPRESSED: &str = "SUPPRESSED";
