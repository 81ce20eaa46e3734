//! Route definitions for the `/batches` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::batches;
use crate::state::AppState;

/// Routes mounted at `/batches`.
///
/// ```text
/// GET    /       -> list_batches
/// POST   /       -> create_batch
/// GET    /{id}   -> get_batch
/// PUT    /{id}   -> update_batch
/// DELETE /{id}   -> delete_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(batches::list_batches).post(batches::create_batch))
        .route(
            "/{id}",
            get(batches::get_batch)
                .put(batches::update_batch)
                .delete(batches::delete_batch),
        )
}
