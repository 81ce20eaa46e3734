//! End-to-end registration and enrollment flows through the router.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, post_json, send_json};
use sqlx::PgPool;

fn dugsi_registration(first_name: &str) -> serde_json::Value {
    serde_json::json!({
        "first_name": first_name,
        "last_name": "Farah",
        "contacts": [
            { "kind": "PHONE", "value": "(612) 555-0000", "is_primary": true }
        ],
        "program": "DUGSI",
        "grade_level": "2"
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_student_creates_the_full_record(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/students", dugsi_registration("Nimo")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let profile_id = json["data"]["profile"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["enrollment"]["status"], "REGISTERED");
    // The phone was normalized on the way in.
    let person_id = json["data"]["person"]["id"].as_i64().unwrap();

    let contacts = get_auth(app.clone(), &format!("/api/v1/persons/{person_id}/contacts")).await;
    let contacts = body_json(contacts).await;
    assert_eq!(contacts["data"][0]["value"], "+16125550000");

    let profile = get_auth(app, &format!("/api/v1/profiles/{profile_id}")).await;
    assert_eq!(profile.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dugsi_registration_with_batch_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = dugsi_registration("Nimo");
    body["batch_id"] = serde_json::json!(1);
    let response = post_json(app, "/api/v1/students", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_transition_returns_400_and_writes_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/students", dugsi_registration("Nimo")).await;
    let json = body_json(response).await;
    let enrollment_id = json["data"]["enrollment"]["id"].as_i64().unwrap();

    // Withdraw, then try to re-enroll the same record.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/enrollments/{enrollment_id}/transition"),
        serde_json::json!({ "status": "WITHDRAWN" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/enrollments/{enrollment_id}/transition"),
        serde_json::json!({ "status": "ENROLLED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let current = get_auth(app, &format!("/api/v1/enrollments/{enrollment_id}")).await;
    let current = body_json(current).await;
    assert_eq!(current["data"]["status"], "WITHDRAWN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn withdrawing_a_dugsi_profile_is_refused(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/students", dugsi_registration("Nimo")).await;
    let json = body_json(response).await;
    let profile_id = json["data"]["profile"]["id"].as_i64().unwrap();

    // The Mahad soft-delete path does not apply to Dugsi.
    let response = post_json(
        app,
        &format!("/api/v1/profiles/{profile_id}/withdraw"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_resolution_reports_per_record_failures(pool: PgPool) {
    let app = common::build_test_app(pool);

    let keep = post_json(app.clone(), "/api/v1/students", dugsi_registration("Nimo")).await;
    let keep = body_json(keep).await["data"]["profile"]["id"].as_i64().unwrap();

    let mut duplicate_body = dugsi_registration("Nimoo");
    duplicate_body["contacts"] = serde_json::json!([]);
    let duplicate = post_json(app.clone(), "/api/v1/students", duplicate_body).await;
    let duplicate = body_json(duplicate).await["data"]["profile"]["id"]
        .as_i64()
        .unwrap();

    // One real duplicate, one id that does not exist: best-effort, both
    // reported.
    let response = post_json(
        app.clone(),
        "/api/v1/profiles/duplicates/resolve",
        serde_json::json!({
            "keep_profile_id": keep,
            "duplicate_profile_ids": [duplicate, 99_999]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["resolved"], serde_json::json!([duplicate]));
    assert_eq!(json["data"]["failed"][0]["profile_id"], 99_999);

    let resolved = get_auth(app, &format!("/api/v1/profiles/{duplicate}")).await;
    let resolved = body_json(resolved).await;
    assert_eq!(resolved["data"]["profile"]["status"], "WITHDRAWN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_crud_and_open_count_guard(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/batches",
        serde_json::json!({ "name": "Cohort 2026A" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let batch_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // A Mahad student enrolled into the batch blocks deletion.
    let mut mahad = dugsi_registration("Ayaan");
    mahad["program"] = serde_json::json!("MAHAD");
    mahad["batch_id"] = serde_json::json!(batch_id);
    let response = post_json(app.clone(), "/api/v1/students", mahad).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        app.clone(),
        Method::DELETE,
        &format!("/api/v1/batches/{batch_id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
