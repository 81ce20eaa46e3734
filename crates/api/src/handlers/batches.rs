//! Handlers for the `/batches` resource (Mahad cohorts).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::error::CoreError;
use maktab_core::types::DbId;
use maktab_db::models::batch::{CreateBatch, UpdateBatch};
use maktab_db::repositories::{BatchRepo, EnrollmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/batches
pub async fn create_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateBatch>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let batch = BatchRepo::create(&state.pool, &input).await?;
    tracing::info!(batch_id = batch.id, name = %batch.name, "Batch created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: batch })))
}

/// GET /api/v1/batches
///
/// Lists batches with open-enrollment counts.
pub async fn list_batches(
    _auth: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let batches = BatchRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: batches }))
}

/// GET /api/v1/batches/{id}
///
/// Returns the batch with its enrollments.
pub async fn get_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(batch_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let batch = BatchRepo::find_by_id(&state.pool, batch_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: batch_id,
        }))?;
    let enrollments = EnrollmentRepo::list_for_batch(&state.pool, batch_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "batch": batch, "enrollments": enrollments }
    })))
}

/// PUT /api/v1/batches/{id}
pub async fn update_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(batch_id): Path<DbId>,
    Json(input): Json<UpdateBatch>,
) -> AppResult<impl IntoResponse> {
    let batch = BatchRepo::update(&state.pool, batch_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: batch_id,
        }))?;
    Ok(Json(DataResponse { data: batch }))
}

/// DELETE /api/v1/batches/{id}
///
/// Refused while the batch still has open enrollments.
pub async fn delete_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(batch_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let open = BatchRepo::open_enrollment_count(&state.pool, batch_id).await?;
    if open > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Batch still has {open} open enrollments"
        ))));
    }

    let found = BatchRepo::delete(&state.pool, batch_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id: batch_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
