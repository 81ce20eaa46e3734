//! Route definitions for the `/teachers` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/teachers`.
///
/// ```text
/// GET    /       -> list_teachers
/// POST   /       -> create_teacher
/// DELETE /{id}   -> deactivate_teacher
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .route("/{id}", delete(teachers::deactivate_teacher))
}
