//! Stripe webhook endpoint: signature enforcement and event application.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, TEST_MAHAD_WEBHOOK_SECRET};
use hmac::{Hmac, Mac};
use maktab_db::models::billing::UpsertSubscription;
use maktab_db::repositories::BillingRepo;
use sha2::Sha256;
use sqlx::PgPool;
use tower::ServiceExt;

fn sign(payload: &str, secret: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={digest}")
}

async fn seed_subscription(pool: &PgPool) {
    let account = BillingRepo::upsert_account(pool, "MAHAD", "cus_hook", "payer@example.com", None)
        .await
        .unwrap();
    BillingRepo::upsert_subscription(
        pool,
        &UpsertSubscription {
            billing_account_id: account.id,
            stripe_subscription_id: "sub_hook".to_string(),
            status: "active".to_string(),
            amount_cents: 6_500,
            currency: "usd".to_string(),
            current_period_start: None,
            current_period_end: None,
            canceled_at: None,
        },
    )
    .await
    .unwrap();
}

fn deletion_event() -> String {
    serde_json::json!({
        "id": "evt_1",
        "type": "customer.subscription.deleted",
        "data": { "object": {
            "id": "sub_hook",
            "customer": "cus_hook",
            "status": "canceled",
            "current_period_start": null,
            "current_period_end": null,
            "canceled_at": 1_760_000_000
        }}
    })
    .to_string()
}

async fn post_webhook(
    app: axum::Router,
    payload: &str,
    signature: Option<&str>,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/webhooks/stripe/mahad")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }
    app.oneshot(builder.body(Body::from(payload.to_string())).unwrap())
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_signature_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_webhook(app, &deletion_event(), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_signature_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_subscription(&pool).await;

    let signature = sign(&deletion_event(), "whsec_wrong_secret");
    let response = post_webhook(app, &deletion_event(), Some(&signature)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The event was not applied.
    let subscription = BillingRepo::find_subscription_by_stripe_id(&pool, "sub_hook")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subscription.status, "active");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deletion_event_cancels_the_local_mirror(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_subscription(&pool).await;

    let payload = deletion_event();
    let signature = sign(&payload, TEST_MAHAD_WEBHOOK_SECRET);
    let response = post_webhook(app, &payload, Some(&signature)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["received"], true);

    let subscription = BillingRepo::find_subscription_by_stripe_id(&pool, "sub_hook")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subscription.status, "canceled");
    assert!(subscription.canceled_at.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_event_type_is_acknowledged(pool: PgPool) {
    let app = common::build_test_app(pool);

    let payload = serde_json::json!({
        "id": "evt_2",
        "type": "invoice.paid",
        "data": { "object": {} }
    })
    .to_string();
    let signature = sign(&payload, TEST_MAHAD_WEBHOOK_SECRET);
    let response = post_webhook(app, &payload, Some(&signature)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
