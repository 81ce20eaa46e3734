//! Route definitions for multi-role lookup.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Routes mounted at `/lookup`.
///
/// ```text
/// GET / -> lookup (?q=...&limit=...)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(lookup::lookup))
}
