//! Handlers for the `/profiles` resource: listing, academic updates, the two
//! deletion policies, and duplicate resolution.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::duplicates::{
    validate_resolution_request, FailedResolution, ResolutionOutcome, ResolutionRequest,
};
use maktab_core::error::CoreError;
use maktab_core::program::{validate_profile_status, Program};
use maktab_core::types::DbId;
use maktab_db::models::program_profile::{ProfileFilter, UpdateProgramProfile};
use maktab_db::repositories::{BillingRepo, EnrollmentRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for profile listings.
const MAX_LIMIT: i64 = 200;

/// GET /api/v1/profiles
pub async fn list_profiles(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(filter): Query<ProfileFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(program) = &filter.program {
        Program::parse(program)?;
    }
    if let Some(status) = &filter.status {
        validate_profile_status(status)?;
    }

    let profiles = ProfileRepo::list(&state.pool, &filter, MAX_LIMIT, 0).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// GET /api/v1/profiles/{id}
///
/// Returns the profile with its enrollment history.
pub async fn get_profile(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: profile_id,
        }))?;
    let enrollments = EnrollmentRepo::list_for_profile(&state.pool, profile_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "profile": profile, "enrollments": enrollments }
    })))
}

/// PUT /api/v1/profiles/{id}
pub async fn update_profile(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    Json(input): Json<UpdateProgramProfile>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::update(&state.pool, profile_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: profile_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/profiles/{id}/withdraw
///
/// The Mahad "delete": enrollments are closed, billing assignments are
/// deactivated, and the profile stays on file as WITHDRAWN for the billing
/// audit trail.
pub async fn withdraw_profile(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: profile_id,
        }))?;

    if Program::parse(&profile.program)? != Program::Mahad {
        return Err(AppError::Core(CoreError::Validation(
            "Only Mahad profiles are withdrawn; delete Dugsi profiles instead".into(),
        )));
    }

    ProfileRepo::withdraw(&state.pool, profile_id).await?;
    tracing::info!(profile_id, "Mahad profile withdrawn");
    Ok(Json(serde_json::json!({ "data": { "withdrawn": true } })))
}

/// DELETE /api/v1/profiles/{id}
///
/// The Dugsi "delete": a hard database delete with cascades. A profile
/// sharing a family reference takes its whole family with it, and each
/// family subscription is canceled on Stripe exactly once.
pub async fn delete_profile(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: profile_id,
        }))?;

    if Program::parse(&profile.program)? != Program::Dugsi {
        return Err(AppError::Core(CoreError::Validation(
            "Only Dugsi profiles are hard-deleted; withdraw Mahad profiles instead".into(),
        )));
    }

    let stripe = state.stripe.for_program(Program::Dugsi);

    let (deleted, canceled) = match profile.family_reference_id {
        Some(family) => {
            // Cancel each distinct family subscription once before the rows
            // disappear, however many siblings share it.
            let subscriptions =
                BillingRepo::active_subscriptions_for_family(&state.pool, family).await?;
            for subscription in &subscriptions {
                stripe
                    .cancel_subscription(&subscription.stripe_subscription_id)
                    .await?;
                BillingRepo::set_subscription_status(
                    &state.pool,
                    &subscription.stripe_subscription_id,
                    "canceled",
                    Some(chrono::Utc::now()),
                )
                .await?;
            }
            let deleted = ProfileRepo::delete_family(&state.pool, family).await?;
            (deleted, subscriptions.len())
        }
        None => {
            let subscription =
                BillingRepo::active_subscription_for_profile(&state.pool, profile_id).await?;
            let mut canceled = 0;
            if let Some(subscription) = subscription {
                stripe
                    .cancel_subscription(&subscription.stripe_subscription_id)
                    .await?;
                BillingRepo::set_subscription_status(
                    &state.pool,
                    &subscription.stripe_subscription_id,
                    "canceled",
                    Some(chrono::Utc::now()),
                )
                .await?;
                canceled = 1;
            }
            let deleted = u64::from(ProfileRepo::delete(&state.pool, profile_id).await?);
            (deleted, canceled)
        }
    };

    tracing::info!(profile_id, deleted, canceled, "Dugsi profile deletion");
    Ok(Json(serde_json::json!({
        "data": { "deleted_profiles": deleted, "canceled_subscriptions": canceled }
    })))
}

/// POST /api/v1/profiles/duplicates/resolve
///
/// Soft merge: every duplicate is withdrawn; the kept profile is untouched.
/// Failures are collected per record and reported, not rolled back.
pub async fn resolve_duplicates(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<ResolutionRequest>,
) -> AppResult<impl IntoResponse> {
    validate_resolution_request(&input)?;

    let keep = ProfileRepo::find_by_id(&state.pool, input.keep_profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: input.keep_profile_id,
        }))?;

    let mut outcome = ResolutionOutcome::default();
    for duplicate_id in &input.duplicate_profile_ids {
        match resolve_one(&state, &keep.program, *duplicate_id).await {
            Ok(()) => outcome.resolved.push(*duplicate_id),
            Err(err) => {
                tracing::warn!(
                    duplicate_id,
                    error = %err,
                    "Duplicate resolution failed for record",
                );
                outcome.failed.push(FailedResolution {
                    profile_id: *duplicate_id,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        keep_profile_id = keep.id,
        resolved = outcome.resolved.len(),
        failed = outcome.failed.len(),
        "Duplicate resolution finished",
    );
    Ok(Json(DataResponse { data: outcome }))
}

async fn resolve_one(
    state: &AppState,
    keep_program: &str,
    duplicate_id: DbId,
) -> Result<(), AppError> {
    let duplicate = ProfileRepo::find_by_id(&state.pool, duplicate_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: duplicate_id,
        }))?;

    if duplicate.program != keep_program {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Profile {duplicate_id} belongs to {}, not {keep_program}",
            duplicate.program
        ))));
    }

    ProfileRepo::withdraw(&state.pool, duplicate_id).await?;
    Ok(())
}
