//! Billing entity models and DTOs (Stripe-backed).

use maktab_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full billing account row from the `billing_accounts` table.
///
/// One per paying household per program; mirrors a Stripe customer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BillingAccount {
    pub id: DbId,
    pub program: String,
    pub stripe_customer_id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Timestamp,
}

/// Full subscription row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub billing_account_id: DbId,
    pub stripe_subscription_id: String,
    pub status: String,
    pub amount_cents: i64,
    pub currency: String,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub canceled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Upsert payload for mirroring a Stripe subscription locally.
#[derive(Debug, Clone)]
pub struct UpsertSubscription {
    pub billing_account_id: DbId,
    pub stripe_subscription_id: String,
    pub status: String,
    pub amount_cents: i64,
    pub currency: String,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub canceled_at: Option<Timestamp>,
}

/// Full billing assignment row from the `billing_assignments` table.
///
/// The many-to-many link between a subscription and the profiles it pays
/// for; family billing fans one subscription out to several profiles.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BillingAssignment {
    pub id: DbId,
    pub subscription_id: DbId,
    pub program_profile_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}
