//! Route definitions for student registration.

use axum::routing::post;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// POST / -> register_student
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(students::register_student))
}
