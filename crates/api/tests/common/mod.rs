//! Shared test harness: rebuilds the production router and middleware stack
//! against a test database, with provider clients pointed at an unroutable
//! address so no test ever leaves the machine.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use maktab_api::config::{
    EmailConfig, MessagingConfig, ServerConfig, StripeConfig, WhatsAppConfig,
};
use maktab_api::routes;
use maktab_api::state::AppState;
use maktab_billing::{StripeAccounts, StripeClient};
use maktab_notify::{Outbox, ResendClient, WhatsAppClient};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Admin token used by every authenticated test request.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Webhook signing secret baked into the test config (Mahad account).
pub const TEST_MAHAD_WEBHOOK_SECRET: &str = "whsec_mahad_test";

/// Nothing listens here; any provider call fails fast.
const UNROUTABLE: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        admin_api_token: TEST_ADMIN_TOKEN.to_string(),
        stripe: StripeConfig {
            mahad_secret_key: "sk_test_mahad".to_string(),
            dugsi_secret_key: "sk_test_dugsi".to_string(),
            mahad_webhook_secret: TEST_MAHAD_WEBHOOK_SECRET.to_string(),
            dugsi_webhook_secret: "whsec_dugsi_test".to_string(),
        },
        whatsapp: WhatsAppConfig {
            access_token: "token".to_string(),
            phone_number_id: "12345".to_string(),
        },
        email: EmailConfig {
            api_key: "re_test".to_string(),
            from: "Maktab <admin@example.org>".to_string(),
        },
        messaging: MessagingConfig {
            send_delay_ms: 0,
            dedupe_window_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let stripe = Arc::new(StripeAccounts::new(
        StripeClient::with_base_url(config.stripe.mahad_secret_key.clone(), UNROUTABLE.into()),
        StripeClient::with_base_url(config.stripe.dugsi_secret_key.clone(), UNROUTABLE.into()),
    ));

    let whatsapp = WhatsAppClient::with_base_url(
        config.whatsapp.access_token.clone(),
        config.whatsapp.phone_number_id.clone(),
        UNROUTABLE.into(),
    );
    let email = ResendClient::with_base_url(
        config.email.api_key.clone(),
        config.email.from.clone(),
        UNROUTABLE.into(),
    );
    let outbox = Arc::new(Outbox::new(
        pool.clone(),
        whatsapp,
        email,
        Duration::from_millis(config.messaging.send_delay_ms),
        config.messaging.dedupe_window_hours,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        stripe,
        outbox,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3001".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Unauthenticated GET.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Authenticated GET with the test admin token.
pub async fn get_auth(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Authenticated JSON request with an arbitrary method.
pub async fn send_json(
    app: Router,
    method: Method,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Authenticated JSON POST.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, path, body).await
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
