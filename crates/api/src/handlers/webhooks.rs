//! Stripe webhook receivers, one endpoint per program account.
//!
//! These endpoints authenticate via the provider signature, not the admin
//! token, and always verify against the raw body bytes before parsing.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use maktab_billing::webhook::{
    parse_event, verify_signature, DEFAULT_TOLERANCE_SECS, EVENT_SUBSCRIPTION_DELETED,
    EVENT_SUBSCRIPTION_UPDATED,
};
use maktab_core::error::CoreError;
use maktab_core::program::Program;
use maktab_db::repositories::BillingRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/webhooks/stripe/{program}
///
/// Maps `customer.subscription.updated` / `.deleted` onto the local
/// subscription mirror. Unknown event types are acknowledged and ignored.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    Path(program): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let program = Program::parse(&program.to_uppercase())?;
    let secret = match program {
        Program::Mahad => &state.config.stripe.mahad_webhook_secret,
        Program::Dugsi => &state.config.stripe.dugsi_webhook_secret,
    };

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Stripe-Signature header".into(),
            ))
        })?;

    verify_signature(
        &body,
        signature,
        secret,
        chrono::Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )
    .map_err(|err| AppError::Core(CoreError::Unauthorized(err.to_string())))?;

    let event = parse_event(&body)
        .map_err(|err| AppError::BadRequest(format!("Undecodable event: {err}")))?;

    match event.event_type.as_str() {
        EVENT_SUBSCRIPTION_UPDATED => {
            let subscription = event
                .subscription()
                .map_err(|err| AppError::BadRequest(format!("Undecodable subscription: {err}")))?;
            let found = BillingRepo::set_subscription_status(
                &state.pool,
                &subscription.id,
                &subscription.status,
                subscription.canceled_at_time(),
            )
            .await?;
            tracing::info!(
                event_id = %event.id,
                subscription = %subscription.id,
                status = %subscription.status,
                found,
                "Subscription update webhook applied",
            );
        }
        EVENT_SUBSCRIPTION_DELETED => {
            let subscription = event
                .subscription()
                .map_err(|err| AppError::BadRequest(format!("Undecodable subscription: {err}")))?;
            let canceled_at = subscription
                .canceled_at_time()
                .unwrap_or_else(chrono::Utc::now);
            let found = BillingRepo::set_subscription_status(
                &state.pool,
                &subscription.id,
                "canceled",
                Some(canceled_at),
            )
            .await?;
            tracing::info!(
                event_id = %event.id,
                subscription = %subscription.id,
                found,
                "Subscription deletion webhook applied",
            );
        }
        other => {
            tracing::debug!(event_id = %event.id, event_type = other, "Ignored webhook event");
        }
    }

    Ok(Json(serde_json::json!({ "received": true })))
}
