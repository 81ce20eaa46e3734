//! Handlers for teacher check-ins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::error::CoreError;
use maktab_core::types::DbId;
use maktab_db::models::check_in::CreateCheckIn;
use maktab_db::repositories::{CheckInRepo, TeacherRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/check-ins/teachers/{teacher_id}
///
/// Refused while the teacher already has an open check-in.
pub async fn check_in(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
    Json(input): Json<CreateCheckIn>,
) -> AppResult<impl IntoResponse> {
    TeacherRepo::find_by_id(&state.pool, teacher_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;

    if CheckInRepo::open_for_teacher(&state.pool, teacher_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Teacher is already checked in".into(),
        )));
    }

    let check_in = CheckInRepo::check_in(&state.pool, teacher_id, input.note.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: check_in })))
}

/// POST /api/v1/check-ins/teachers/{teacher_id}/check-out
pub async fn check_out(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let closed = CheckInRepo::check_out(&state.pool, teacher_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Teacher has no open check-in".into(),
            ))
        })?;
    Ok(Json(DataResponse { data: closed }))
}

/// Query parameters for `GET /check-ins/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}

/// GET /api/v1/check-ins/recent
pub async fn list_recent(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50).min(200);
    let check_ins = CheckInRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: check_ins }))
}
