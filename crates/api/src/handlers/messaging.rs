//! Handlers for outbound messaging through the outbox.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::error::CoreError;
use maktab_db::repositories::MessageLogRepo;
use maktab_notify::OutboxError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

fn map_outbox_error(err: OutboxError) -> AppError {
    match err {
        OutboxError::InvalidRecipient(raw) => {
            AppError::BadRequest(format!("'{raw}' is not a valid phone number"))
        }
        OutboxError::AlreadySent => AppError::Core(CoreError::Conflict(
            "Message already sent to this recipient recently".into(),
        )),
        OutboxError::Database(err) => AppError::Database(err),
        OutboxError::WhatsApp(err) => AppError::Upstream(err.to_string()),
        OutboxError::Email(err) => AppError::Upstream(err.to_string()),
    }
}

/// Request body for `POST /messages/whatsapp`.
#[derive(Debug, Deserialize)]
pub struct SendWhatsApp {
    pub to: String,
    pub template: String,
    #[serde(default)]
    pub params: Vec<String>,
}

/// POST /api/v1/messages/whatsapp
///
/// A repeat of the same template to the same number inside the configured
/// window comes back 409 without any provider call.
pub async fn send_whatsapp(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<SendWhatsApp>,
) -> AppResult<impl IntoResponse> {
    let outcome = state
        .outbox
        .send_whatsapp(&input.to, &input.template, &input.params)
        .await
        .map_err(map_outbox_error)?;
    Ok(Json(DataResponse { data: outcome }))
}

/// Request body for `POST /messages/whatsapp/bulk`.
#[derive(Debug, Deserialize)]
pub struct SendWhatsAppBulk {
    pub recipients: Vec<String>,
    pub template: String,
    #[serde(default)]
    pub params: Vec<String>,
}

/// POST /api/v1/messages/whatsapp/bulk
///
/// Sequential, rate-limited, best-effort; returns aggregate counts.
pub async fn send_whatsapp_bulk(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<SendWhatsAppBulk>,
) -> AppResult<impl IntoResponse> {
    if input.recipients.is_empty() {
        return Err(AppError::BadRequest("recipients must not be empty".into()));
    }

    let report = state
        .outbox
        .send_whatsapp_bulk(&input.recipients, &input.template, &input.params)
        .await;
    Ok(Json(DataResponse { data: report }))
}

/// Request body for `POST /messages/email`.
#[derive(Debug, Deserialize)]
pub struct SendEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Label recorded in the message log.
    pub template: String,
}

/// POST /api/v1/messages/email
pub async fn send_email(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<SendEmail>,
) -> AppResult<impl IntoResponse> {
    let outcome = state
        .outbox
        .send_email(&input.to, &input.subject, &input.html, &input.template)
        .await
        .map_err(map_outbox_error)?;
    Ok(Json(DataResponse { data: outcome }))
}

/// Query parameters for `GET /messages/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}

/// GET /api/v1/messages/recent
pub async fn list_recent(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50).min(200);
    let messages = MessageLogRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: messages }))
}
