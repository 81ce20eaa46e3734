//! Route definitions for webhook receivers.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`. Signature-authenticated, no admin token.
///
/// ```text
/// POST /stripe/{program} -> stripe_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/stripe/{program}", post(webhooks::stripe_webhook))
}
