//! Handlers for the `/billing` resource: subscription linkage and billing
//! views.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::contact::normalize_email;
use maktab_core::error::CoreError;
use maktab_core::program::Program;
use maktab_core::types::DbId;
use maktab_db::models::billing::UpsertSubscription;
use maktab_db::repositories::{BillingRepo, ProfileRepo};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /billing/link`.
#[derive(Debug, Deserialize)]
pub struct LinkSubscription {
    pub program: String,
    pub stripe_subscription_id: String,
    /// The paying parent's email; every profile in the program with a
    /// guardian carrying this email gets an assignment.
    pub parent_email: String,
}

/// POST /api/v1/billing/link
///
/// Fetches the subscription from the program's Stripe account and fans its
/// status/amount/period out to every matching profile.
pub async fn link_subscription(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<LinkSubscription>,
) -> AppResult<impl IntoResponse> {
    let program = Program::parse(&input.program)?;
    let email = normalize_email(&input.parent_email).ok_or_else(|| {
        AppError::BadRequest(format!(
            "'{}' is not a valid email address",
            input.parent_email
        ))
    })?;

    let profile_ids =
        ProfileRepo::ids_by_guardian_email(&state.pool, program.as_str(), &email).await?;
    if profile_ids.is_empty() {
        return Err(AppError::BadRequest(format!(
            "No {program} profiles found for parent email {email}"
        )));
    }

    let stripe_subscription = state
        .stripe
        .for_program(program)
        .get_subscription(&input.stripe_subscription_id)
        .await?;

    let account = BillingRepo::upsert_account(
        &state.pool,
        program.as_str(),
        &stripe_subscription.customer,
        &email,
        None,
    )
    .await?;

    let subscription = BillingRepo::upsert_subscription(
        &state.pool,
        &UpsertSubscription {
            billing_account_id: account.id,
            stripe_subscription_id: stripe_subscription.id.clone(),
            status: stripe_subscription.status.clone(),
            amount_cents: stripe_subscription.amount_cents(),
            currency: stripe_subscription.currency().to_string(),
            current_period_start: stripe_subscription.period_start(),
            current_period_end: stripe_subscription.period_end(),
            canceled_at: stripe_subscription.canceled_at_time(),
        },
    )
    .await?;

    let mut assignments = Vec::with_capacity(profile_ids.len());
    for profile_id in &profile_ids {
        assignments
            .push(BillingRepo::upsert_assignment(&state.pool, subscription.id, *profile_id).await?);
    }

    tracing::info!(
        subscription_id = subscription.id,
        profiles = assignments.len(),
        program = %program,
        "Subscription linked",
    );
    Ok(Json(serde_json::json!({
        "data": { "subscription": subscription, "assignments": assignments }
    })))
}

/// GET /api/v1/billing/profiles/{profile_id}
///
/// The subscription currently billing a profile, if any.
pub async fn profile_billing(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: profile_id,
        }))?;

    let subscription = BillingRepo::active_subscription_for_profile(&state.pool, profile_id).await?;
    Ok(Json(DataResponse { data: subscription }))
}

/// GET /api/v1/billing/families/{family_reference_id}
///
/// Every subscription actively billing the family, with assignments.
pub async fn family_billing(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(family_reference_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let subscriptions =
        BillingRepo::active_subscriptions_for_family(&state.pool, family_reference_id).await?;

    let mut entries = Vec::with_capacity(subscriptions.len());
    for subscription in subscriptions {
        let assignments =
            BillingRepo::assignments_for_subscription(&state.pool, subscription.id).await?;
        entries.push(serde_json::json!({
            "subscription": subscription,
            "assignments": assignments,
        }));
    }

    Ok(Json(DataResponse { data: entries }))
}
