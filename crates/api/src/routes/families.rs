//! Route definitions for the `/families` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::families;
use crate::state::AppState;

/// Routes mounted at `/families`.
///
/// ```text
/// GET    /                         -> list_families
/// GET    /pricing                  -> pricing_quote
/// POST   /detect-siblings          -> detect_siblings
/// POST   /siblings                 -> add_sibling
/// GET    /siblings/{person_id}     -> list_siblings
/// DELETE /siblings/{a}/{b}         -> remove_sibling
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(families::list_families))
        .route("/pricing", get(families::pricing_quote))
        .route("/detect-siblings", post(families::detect_siblings))
        .route("/siblings", post(families::add_sibling))
        .route("/siblings/{person_id}", get(families::list_siblings))
        .route(
            "/siblings/{person_a}/{person_b}",
            delete(families::remove_sibling),
        )
}
