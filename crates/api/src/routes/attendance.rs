//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /                      -> record_attendance
/// GET  /enrollments/{id}      -> list_for_enrollment
/// GET  /batches/{batch_id}    -> list_for_batch (?date=YYYY-MM-DD)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(attendance::record_attendance))
        .route("/enrollments/{id}", get(attendance::list_for_enrollment))
        .route("/batches/{batch_id}", get(attendance::list_for_batch))
}
