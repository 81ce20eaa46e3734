//! Handlers for the `/teachers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::error::CoreError;
use maktab_core::program::Program;
use maktab_core::types::DbId;
use maktab_db::models::teacher::CreateTeacher;
use maktab_db::repositories::TeacherRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/teachers
pub async fn create_teacher(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTeacher>,
) -> AppResult<impl IntoResponse> {
    Program::parse(&input.program)?;
    let teacher = TeacherRepo::create(&state.pool, &input).await?;
    tracing::info!(teacher_id = teacher.id, person_id = teacher.person_id, "Teacher registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: teacher })))
}

/// Query parameters for `GET /teachers`.
#[derive(Debug, Deserialize)]
pub struct TeacherQuery {
    pub program: Option<String>,
}

/// GET /api/v1/teachers
pub async fn list_teachers(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(params): Query<TeacherQuery>,
) -> AppResult<impl IntoResponse> {
    if let Some(program) = &params.program {
        Program::parse(program)?;
    }
    let teachers = TeacherRepo::list(&state.pool, params.program.as_deref()).await?;
    Ok(Json(DataResponse { data: teachers }))
}

/// DELETE /api/v1/teachers/{id}
pub async fn deactivate_teacher(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(teacher_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = TeacherRepo::deactivate(&state.pool, teacher_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
