//! Route definitions for the `/messages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messaging;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /whatsapp        -> send_whatsapp
/// POST /whatsapp/bulk   -> send_whatsapp_bulk
/// POST /email           -> send_email
/// GET  /recent          -> list_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/whatsapp", post(messaging::send_whatsapp))
        .route("/whatsapp/bulk", post(messaging::send_whatsapp_bulk))
        .route("/email", post(messaging::send_email))
        .route("/recent", get(messaging::list_recent))
}
