//! Route definitions for the `/profiles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET    /                       -> list_profiles
/// GET    /{id}                   -> get_profile
/// PUT    /{id}                   -> update_profile
/// DELETE /{id}                   -> delete_profile (Dugsi hard delete)
/// POST   /{id}/withdraw          -> withdraw_profile (Mahad soft delete)
/// POST   /duplicates/resolve     -> resolve_duplicates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profiles::list_profiles))
        .route(
            "/{id}",
            get(profiles::get_profile)
                .put(profiles::update_profile)
                .delete(profiles::delete_profile),
        )
        .route("/{id}/withdraw", post(profiles::withdraw_profile))
        .route("/duplicates/resolve", post(profiles::resolve_duplicates))
}
