//! Repository for billing accounts, subscriptions, and assignments.

use maktab_core::types::{DbId, Timestamp};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::billing::{
    BillingAccount, BillingAssignment, Subscription, UpsertSubscription,
};

const ACCOUNT_COLUMNS: &str = "id, program, stripe_customer_id, email, name, created_at";
const SUBSCRIPTION_COLUMNS: &str =
    "id, billing_account_id, stripe_subscription_id, status, amount_cents, currency, \
     current_period_start, current_period_end, canceled_at, created_at, updated_at";
const ASSIGNMENT_COLUMNS: &str =
    "id, subscription_id, program_profile_id, is_active, created_at";

/// Provides operations on the billing tables.
pub struct BillingRepo;

impl BillingRepo {
    /// Upsert a billing account keyed by Stripe customer id.
    pub async fn upsert_account(
        pool: &PgPool,
        program: &str,
        stripe_customer_id: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<BillingAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO billing_accounts (program, stripe_customer_id, email, name)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_billing_accounts_customer
             DO UPDATE SET email = EXCLUDED.email,
                           name = COALESCE(EXCLUDED.name, billing_accounts.name)
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, BillingAccount>(&query)
            .bind(program)
            .bind(stripe_customer_id)
            .bind(email)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Upsert a local mirror of a Stripe subscription.
    pub async fn upsert_subscription(
        pool: &PgPool,
        input: &UpsertSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions
                (billing_account_id, stripe_subscription_id, status, amount_cents, currency,
                 current_period_start, current_period_end, canceled_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT ON CONSTRAINT uq_subscriptions_stripe
             DO UPDATE SET status = EXCLUDED.status,
                           amount_cents = EXCLUDED.amount_cents,
                           currency = EXCLUDED.currency,
                           current_period_start = EXCLUDED.current_period_start,
                           current_period_end = EXCLUDED.current_period_end,
                           canceled_at = EXCLUDED.canceled_at,
                           updated_at = NOW()
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.billing_account_id)
            .bind(&input.stripe_subscription_id)
            .bind(&input.status)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(input.current_period_start)
            .bind(input.current_period_end)
            .bind(input.canceled_at)
            .fetch_one(pool)
            .await
    }

    /// Find a subscription by its Stripe id.
    pub async fn find_subscription_by_stripe_id(
        pool: &PgPool,
        stripe_subscription_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE stripe_subscription_id = $1"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(stripe_subscription_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a subscription's status from a webhook event. Returns `true`
    /// if a row was updated.
    pub async fn set_subscription_status(
        pool: &PgPool,
        stripe_subscription_id: &str,
        status: &str,
        canceled_at: Option<Timestamp>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subscriptions
             SET status = $2,
                 canceled_at = COALESCE($3, canceled_at),
                 updated_at = NOW()
             WHERE stripe_subscription_id = $1",
        )
        .bind(stripe_subscription_id)
        .bind(status)
        .bind(canceled_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Create an assignment or reactivate the existing one for the pair.
    pub async fn upsert_assignment(
        pool: &PgPool,
        subscription_id: DbId,
        program_profile_id: DbId,
    ) -> Result<BillingAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO billing_assignments (subscription_id, program_profile_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_billing_assignment
             DO UPDATE SET is_active = true
             RETURNING {ASSIGNMENT_COLUMNS}"
        );
        sqlx::query_as::<_, BillingAssignment>(&query)
            .bind(subscription_id)
            .bind(program_profile_id)
            .fetch_one(pool)
            .await
    }

    /// List a subscription's assignments.
    pub async fn assignments_for_subscription(
        pool: &PgPool,
        subscription_id: DbId,
    ) -> Result<Vec<BillingAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM billing_assignments
             WHERE subscription_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, BillingAssignment>(&query)
            .bind(subscription_id)
            .fetch_all(pool)
            .await
    }

    /// The subscription actively billing a profile, if any.
    pub async fn active_subscription_for_profile(
        pool: &PgPool,
        program_profile_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            "SELECT s.id, s.billing_account_id, s.stripe_subscription_id, s.status,
                    s.amount_cents, s.currency, s.current_period_start, s.current_period_end,
                    s.canceled_at, s.created_at, s.updated_at
             FROM subscriptions s
             JOIN billing_assignments a ON a.subscription_id = s.id AND a.is_active
             WHERE a.program_profile_id = $1
             ORDER BY s.created_at DESC
             LIMIT 1",
        )
        .bind(program_profile_id)
        .fetch_optional(pool)
        .await
    }

    /// Distinct subscriptions actively assigned to any profile in a family.
    ///
    /// Family deletion cancels each of these on Stripe exactly once, however
    /// many siblings it covers.
    pub async fn active_subscriptions_for_family(
        pool: &PgPool,
        family_reference_id: Uuid,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            "SELECT DISTINCT s.id, s.billing_account_id, s.stripe_subscription_id, s.status,
                    s.amount_cents, s.currency, s.current_period_start, s.current_period_end,
                    s.canceled_at, s.created_at, s.updated_at
             FROM subscriptions s
             JOIN billing_assignments a ON a.subscription_id = s.id AND a.is_active
             JOIN program_profiles pp ON pp.id = a.program_profile_id
             WHERE pp.family_reference_id = $1",
        )
        .bind(family_reference_id)
        .fetch_all(pool)
        .await
    }
}
