//! Multi-role person lookup across both programs.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::contact::{normalize_email, normalize_phone};
use maktab_db::repositories::PersonRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub q: String,
    /// Maximum number of results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// GET /api/v1/lookup
///
/// Matches a name prefix, a phone number, or an email; each hit reports the
/// roles the person holds (student, teacher, parent).
pub async fn lookup(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> AppResult<impl IntoResponse> {
    let q = params.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".into()));
    }
    let limit = params.limit.unwrap_or(20).min(100);

    let name_pattern = format!("{}%", q.replace('%', "\\%").replace('_', "\\_"));
    let phone = normalize_phone(q);
    let email = normalize_email(q);

    let hits = PersonRepo::lookup(
        &state.pool,
        &name_pattern,
        phone.as_deref(),
        email.as_deref(),
        limit,
    )
    .await?;

    let results: Vec<serde_json::Value> = hits
        .into_iter()
        .map(|hit| {
            let mut roles = Vec::new();
            if hit.is_student {
                roles.push("student");
            }
            if hit.is_teacher {
                roles.push("teacher");
            }
            if hit.is_parent {
                roles.push("parent");
            }
            serde_json::json!({
                "id": hit.id,
                "first_name": hit.first_name,
                "last_name": hit.last_name,
                "roles": roles,
            })
        })
        .collect();

    Ok(Json(DataResponse { data: results }))
}
