//! Route definitions for the `/enrollments` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// POST   /                  -> create_enrollment
/// GET    /{id}              -> get_enrollment
/// POST   /{id}/transition   -> transition_enrollment
/// PUT    /{id}/batch        -> assign_batch
/// POST   /transfer          -> bulk_transfer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(enrollments::create_enrollment))
        .route("/{id}", get(enrollments::get_enrollment))
        .route("/{id}/transition", post(enrollments::transition_enrollment))
        .route("/{id}/batch", put(enrollments::assign_batch))
        .route("/transfer", post(enrollments::bulk_transfer))
}
