//! Stripe webhook signature verification and event decoding.
//!
//! Stripe signs the raw payload with HMAC-SHA256 over `"{t}.{payload}"` and
//! sends the result in the `Stripe-Signature` header as
//! `t=<unix>,v1=<hex>[,v1=<hex>...]`. Verification must run on the raw body
//! bytes before any JSON parsing.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::types::StripeSubscription;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted skew between the signature timestamp and now.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const EVENT_SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";
pub const EVENT_SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// Errors from webhook verification or decoding.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Malformed Stripe-Signature header")]
    MalformedHeader,

    #[error("Signature timestamp outside tolerance")]
    TimestampOutOfTolerance,

    #[error("No signature matched the payload")]
    SignatureMismatch,

    #[error("Undecodable event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A decoded webhook event.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Decode the event's object as a subscription, for
    /// `customer.subscription.*` events.
    pub fn subscription(&self) -> Result<StripeSubscription, WebhookError> {
        Ok(serde_json::from_value(self.data.object.clone())?)
    }
}

/// Verify a `Stripe-Signature` header against the raw payload.
///
/// `now_unix` is the caller's clock; signatures older or newer than
/// `tolerance_secs` are rejected before any HMAC work.
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
    now_unix: i64,
    tolerance_secs: i64,
) -> Result<(), WebhookError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| WebhookError::MalformedHeader)?);
            }
            Some(("v1", value)) => candidates.push(value),
            Some(_) => {} // ignore v0 and unknown schemes
            None => return Err(WebhookError::MalformedHeader),
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if candidates.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }
    if (now_unix - timestamp).abs() > tolerance_secs {
        return Err(WebhookError::TimestampOutOfTolerance);
    }

    for candidate in candidates {
        let Ok(candidate_bytes) = hex::decode(candidate) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&candidate_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(WebhookError::SignatureMismatch)
}

/// Decode a verified payload into an event.
pub fn parse_event(payload: &[u8]) -> Result<StripeEvent, WebhookError> {
    Ok(serde_json::from_slice(payload)?)
}
