//! Handlers for the `/attendance` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use maktab_core::attendance::validate_attendance_status;
use maktab_core::error::CoreError;
use maktab_core::types::DbId;
use maktab_db::models::attendance::RecordAttendance;
use maktab_db::repositories::{AttendanceRepo, EnrollmentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/attendance
///
/// Records one enrollment's attendance for one day; recording the same day
/// again overwrites.
pub async fn record_attendance(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<RecordAttendance>,
) -> AppResult<impl IntoResponse> {
    validate_attendance_status(&input.status)?;

    EnrollmentRepo::find_by_id(&state.pool, input.enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: input.enrollment_id,
        }))?;

    let record = AttendanceRepo::upsert(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/attendance/enrollments/{id}
pub async fn list_for_enrollment(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(enrollment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records = AttendanceRepo::list_for_enrollment(&state.pool, enrollment_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// Query parameters for the batch roll-call view.
#[derive(Debug, Deserialize)]
pub struct RollCallQuery {
    pub date: NaiveDate,
}

/// GET /api/v1/attendance/batches/{batch_id}?date=YYYY-MM-DD
pub async fn list_for_batch(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(batch_id): Path<DbId>,
    Query(params): Query<RollCallQuery>,
) -> AppResult<impl IntoResponse> {
    let records = AttendanceRepo::list_for_batch_date(&state.pool, batch_id, params.date).await?;
    Ok(Json(DataResponse { data: records }))
}
