//! Handlers for the `/enrollments` resource: creation, status transitions,
//! batch assignment, and bulk batch transfer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::enrollment::{validate_transition, EnrollmentStatus};
use maktab_core::error::CoreError;
use maktab_core::program::{validate_batch_reference, Program};
use maktab_core::types::DbId;
use maktab_db::models::enrollment::{CreateEnrollment, TransitionEnrollment};
use maktab_db::repositories::{BatchRepo, EnrollmentRepo, ProfileRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/enrollments
///
/// Opens a new enrollment for a profile. Rejected when the profile already
/// has an open enrollment or when a batch is supplied for a program without
/// batches.
pub async fn create_enrollment(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateEnrollment>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, input.program_profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: input.program_profile_id,
        }))?;

    let program = Program::parse(&profile.program)?;
    validate_batch_reference(program, input.batch_id)?;

    if EnrollmentRepo::open_for_profile(&state.pool, profile.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Profile already has an open enrollment".into(),
        )));
    }

    let enrollment = EnrollmentRepo::create(&state.pool, &input).await?;
    tracing::info!(enrollment_id = enrollment.id, profile_id = profile.id, "Enrollment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: enrollment })))
}

/// GET /api/v1/enrollments/{id}
pub async fn get_enrollment(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;
    Ok(Json(DataResponse { data: enrollment }))
}

/// POST /api/v1/enrollments/{id}/transition
///
/// Moves an enrollment along the status allow-list. An invalid transition
/// fails here, before any write. Transitioning into a terminal status
/// end-dates the enrollment (the supplied `end_date`, defaulting to now).
pub async fn transition_enrollment(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
    Json(input): Json<TransitionEnrollment>,
) -> AppResult<impl IntoResponse> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let from = EnrollmentStatus::parse(&enrollment.status)?;
    let to = EnrollmentStatus::parse(&input.status)?;
    validate_transition(from, to)?;

    let end_date = if to.is_terminal() {
        Some(input.end_date.unwrap_or_else(chrono::Utc::now))
    } else {
        None
    };

    let updated = EnrollmentRepo::apply_transition(&state.pool, enrollment_id, to.as_str(), end_date)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    tracing::info!(enrollment_id, from = %from, to = %to, "Enrollment transitioned");
    Ok(Json(DataResponse { data: updated }))
}

/// Request body for batch assignment.
#[derive(Debug, Deserialize)]
pub struct AssignBatch {
    /// `null` moves the enrollment out of its batch.
    pub batch_id: Option<DbId>,
}

/// PUT /api/v1/enrollments/{id}/batch
pub async fn assign_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
    Json(input): Json<AssignBatch>,
) -> AppResult<impl IntoResponse> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let profile = ProfileRepo::find_by_id(&state.pool, enrollment.program_profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: enrollment.program_profile_id,
        }))?;
    validate_batch_reference(Program::parse(&profile.program)?, input.batch_id)?;

    if let Some(batch_id) = input.batch_id {
        BatchRepo::find_by_id(&state.pool, batch_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Batch",
                id: batch_id,
            }))?;
    }

    let updated = EnrollmentRepo::assign_batch(&state.pool, enrollment_id, input.batch_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// Request body for `POST /enrollments/transfer`.
#[derive(Debug, Deserialize)]
pub struct BulkTransfer {
    pub enrollment_ids: Vec<DbId>,
    pub batch_id: DbId,
}

/// Per-item results of a bulk transfer.
#[derive(Debug, Default, Serialize)]
pub struct TransferReport {
    pub transferred: Vec<DbId>,
    pub failed: Vec<TransferFailure>,
}

#[derive(Debug, Serialize)]
pub struct TransferFailure {
    pub enrollment_id: DbId,
    pub error: String,
}

/// POST /api/v1/enrollments/transfer
///
/// Moves many enrollments into a target batch, best-effort: each item
/// succeeds or fails on its own and the caller gets both lists.
pub async fn bulk_transfer(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<BulkTransfer>,
) -> AppResult<impl IntoResponse> {
    if input.enrollment_ids.is_empty() {
        return Err(AppError::BadRequest(
            "enrollment_ids must not be empty".into(),
        ));
    }

    BatchRepo::find_by_id(&state.pool, input.batch_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: input.batch_id,
        }))?;

    let mut report = TransferReport::default();
    for enrollment_id in &input.enrollment_ids {
        match transfer_one(&state, *enrollment_id, input.batch_id).await {
            Ok(()) => report.transferred.push(*enrollment_id),
            Err(err) => report.failed.push(TransferFailure {
                enrollment_id: *enrollment_id,
                error: err.to_string(),
            }),
        }
    }

    tracing::info!(
        batch_id = input.batch_id,
        transferred = report.transferred.len(),
        failed = report.failed.len(),
        "Bulk batch transfer finished",
    );
    Ok(Json(DataResponse { data: report }))
}

async fn transfer_one(
    state: &AppState,
    enrollment_id: DbId,
    batch_id: DbId,
) -> Result<(), AppError> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let profile = ProfileRepo::find_by_id(&state.pool, enrollment.program_profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProgramProfile",
            id: enrollment.program_profile_id,
        }))?;
    validate_batch_reference(Program::parse(&profile.program)?, Some(batch_id))?;

    EnrollmentRepo::assign_batch(&state.pool, enrollment_id, Some(batch_id)).await?;
    Ok(())
}
