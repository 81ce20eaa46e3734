//! Route definitions for teacher check-ins.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::check_ins;
use crate::state::AppState;

/// Routes mounted at `/check-ins`.
///
/// ```text
/// POST /teachers/{teacher_id}            -> check_in
/// POST /teachers/{teacher_id}/check-out  -> check_out
/// GET  /recent                           -> list_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teachers/{teacher_id}", post(check_ins::check_in))
        .route(
            "/teachers/{teacher_id}/check-out",
            post(check_ins::check_out),
        )
        .route("/recent", get(check_ins::list_recent))
}
