//! Typed subset of the Stripe objects this service reads.
//!
//! Only the fields the linkage and webhook flows consume are modeled;
//! everything else in the provider payload is ignored during
//! deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A Stripe subscription, as returned by `GET /v1/subscriptions/{id}` and
/// carried in `customer.subscription.*` webhook events.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    /// Stripe customer id (`cus_...`).
    pub customer: String,
    /// Provider-side status string (`active`, `past_due`, `canceled`, ...).
    pub status: String,
    /// Unix seconds.
    pub current_period_start: Option<i64>,
    /// Unix seconds.
    pub current_period_end: Option<i64>,
    /// Unix seconds; set once the subscription is canceled.
    pub canceled_at: Option<i64>,
    #[serde(default)]
    pub items: StripeList<StripeSubscriptionItem>,
}

/// Stripe's list envelope (`{ "object": "list", "data": [...] }`).
#[derive(Debug, Clone, Deserialize)]
pub struct StripeList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for StripeList<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionItem {
    pub price: StripePrice,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    /// Amount in the currency's smallest unit.
    pub unit_amount: Option<i64>,
    pub currency: String,
}

impl StripeSubscription {
    /// Total recurring amount in cents across all items.
    pub fn amount_cents(&self) -> i64 {
        self.items
            .data
            .iter()
            .map(|item| item.price.unit_amount.unwrap_or(0) * item.quantity.unwrap_or(1))
            .sum()
    }

    /// Currency of the first item, defaulting to `usd` for item-less
    /// subscriptions.
    pub fn currency(&self) -> &str {
        self.items
            .data
            .first()
            .map(|item| item.price.currency.as_str())
            .unwrap_or("usd")
    }

    pub fn period_start(&self) -> Option<DateTime<Utc>> {
        self.current_period_start.and_then(from_unix)
    }

    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        self.current_period_end.and_then(from_unix)
    }

    pub fn canceled_at_time(&self) -> Option<DateTime<Utc>> {
        self.canceled_at.and_then(from_unix)
    }
}

fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_sums_items_with_quantities() {
        let subscription: StripeSubscription = serde_json::from_value(serde_json::json!({
            "id": "sub_123",
            "customer": "cus_123",
            "status": "active",
            "current_period_start": 1_760_000_000,
            "current_period_end": 1_762_600_000,
            "canceled_at": null,
            "items": { "data": [
                { "price": { "unit_amount": 6500, "currency": "usd" }, "quantity": 1 },
                { "price": { "unit_amount": 5500, "currency": "usd" }, "quantity": 2 }
            ]}
        }))
        .unwrap();

        assert_eq!(subscription.amount_cents(), 17_500);
        assert_eq!(subscription.currency(), "usd");
        assert!(subscription.period_start().is_some());
        assert!(subscription.canceled_at_time().is_none());
    }

    #[test]
    fn missing_items_default_to_empty_list() {
        let subscription: StripeSubscription = serde_json::from_value(serde_json::json!({
            "id": "sub_123",
            "customer": "cus_123",
            "status": "canceled",
            "current_period_start": null,
            "current_period_end": null,
            "canceled_at": 1_760_000_000
        }))
        .unwrap();

        assert_eq!(subscription.amount_cents(), 0);
        assert_eq!(subscription.currency(), "usd");
        assert!(subscription.canceled_at_time().is_some());
    }
}
