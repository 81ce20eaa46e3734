//! Messaging endpoints: duplicate suppression surfaces as 409 before any
//! provider call; provider failures surface as 502.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use maktab_db::repositories::MessageLogRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_whatsapp_send_returns_conflict(pool: PgPool) {
    MessageLogRepo::record(
        &pool,
        "+16125550000",
        "WHATSAPP",
        "attendance_reminder",
        "SENT",
        None,
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/messages/whatsapp",
        serde_json::json!({
            "to": "6125550000",
            "template": "attendance_reminder"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn provider_failure_surfaces_as_bad_gateway(pool: PgPool) {
    // The test harness points WhatsApp at an unroutable address.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/messages/whatsapp",
        serde_json::json!({
            "to": "6125550000",
            "template": "attendance_reminder"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The attempt was still logged.
    let recent = MessageLogRepo::list_recent(&pool, 5).await.unwrap();
    assert_eq!(recent[0].status, "FAILED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_recipient_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/messages/whatsapp",
        serde_json::json!({
            "to": "not a number",
            "template": "attendance_reminder"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
