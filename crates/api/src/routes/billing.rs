//! Route definitions for the `/billing` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

/// Routes mounted at `/billing`.
///
/// ```text
/// POST /link                                -> link_subscription
/// GET  /profiles/{profile_id}               -> profile_billing
/// GET  /families/{family_reference_id}      -> family_billing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/link", post(billing::link_subscription))
        .route("/profiles/{profile_id}", get(billing::profile_billing))
        .route(
            "/families/{family_reference_id}",
            get(billing::family_billing),
        )
}
