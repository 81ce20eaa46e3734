//! Handlers for the `/families` resource: household grouping, sibling
//! detection, manual sibling links, and family pricing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::error::CoreError;
use maktab_core::pricing::dugsi_monthly_rate_cents;
use maktab_core::relationships::{
    normalize_pair, pair_candidates, CONFIDENCE_FAMILY_REFERENCE, CONFIDENCE_GUARDIAN_EMAIL,
    CONFIDENCE_GUARDIAN_PHONE, CONFIDENCE_MANUAL, DETECTION_FAMILY_REFERENCE,
    DETECTION_GUARDIAN_CONTACT, DETECTION_MANUAL,
};
use maktab_core::types::DbId;
use maktab_db::models::relationship::CreateSiblingRelationship;
use maktab_db::repositories::SiblingRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/families
///
/// Households grouped by family reference, with member person ids and the
/// family's Dugsi rate.
pub async fn list_families(
    _auth: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let groups = SiblingRepo::family_reference_groups(&state.pool).await?;
    let families: Vec<serde_json::Value> = groups
        .into_iter()
        .map(|group| {
            let children = group.person_ids.len() as u32;
            serde_json::json!({
                "family_reference_id": group.family_reference_id,
                "person_ids": group.person_ids,
                "children": children,
                "monthly_rate_cents": dugsi_monthly_rate_cents(children),
            })
        })
        .collect();
    Ok(Json(DataResponse { data: families }))
}

/// Query parameters for `GET /families/pricing`.
#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub children: u32,
}

/// GET /api/v1/families/pricing
pub async fn pricing_quote(
    _auth: AdminAuth,
    Query(params): Query<PricingQuery>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(serde_json::json!({
        "data": {
            "children": params.children,
            "monthly_rate_cents": dugsi_monthly_rate_cents(params.children),
        }
    })))
}

/// POST /api/v1/families/detect-siblings
///
/// Runs sibling detection over both signals: shared family references
/// (confidence 1.0) and shared guardian contacts (email 0.9, phone 0.8).
/// Existing pairs are refreshed or reactivated, never duplicated.
pub async fn detect_siblings(
    _auth: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut groups: Vec<(Vec<DbId>, &'static str, f64)> = Vec::new();

    for group in SiblingRepo::family_reference_groups(&state.pool).await? {
        groups.push((
            group.person_ids,
            DETECTION_FAMILY_REFERENCE,
            CONFIDENCE_FAMILY_REFERENCE,
        ));
    }
    for group in SiblingRepo::guardian_contact_groups(&state.pool).await? {
        let confidence = if group.contact_kind == "EMAIL" {
            CONFIDENCE_GUARDIAN_EMAIL
        } else {
            CONFIDENCE_GUARDIAN_PHONE
        };
        groups.push((
            group.student_person_ids,
            DETECTION_GUARDIAN_CONTACT,
            confidence,
        ));
    }

    let candidates = pair_candidates(&groups);
    let mut recorded = 0usize;
    for candidate in &candidates {
        SiblingRepo::upsert_pair(
            &state.pool,
            candidate.person1_id,
            candidate.person2_id,
            candidate.detection_method,
            candidate.confidence,
        )
        .await?;
        recorded += 1;
    }

    tracing::info!(pairs = recorded, "Sibling detection finished");
    Ok(Json(serde_json::json!({ "data": { "pairs": recorded } })))
}

/// POST /api/v1/families/siblings
///
/// Records a manual sibling pair.
pub async fn add_sibling(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateSiblingRelationship>,
) -> AppResult<impl IntoResponse> {
    let (person1_id, person2_id) = normalize_pair(input.person_a_id, input.person_b_id)?;
    let relationship = SiblingRepo::upsert_pair(
        &state.pool,
        person1_id,
        person2_id,
        DETECTION_MANUAL,
        CONFIDENCE_MANUAL,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: relationship }),
    ))
}

/// GET /api/v1/families/siblings/{person_id}
pub async fn list_siblings(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let siblings = SiblingRepo::list_for_person(&state.pool, person_id).await?;
    Ok(Json(DataResponse { data: siblings }))
}

/// DELETE /api/v1/families/siblings/{person_a}/{person_b}
///
/// Soft removal; a later detection run may reactivate the pair.
pub async fn remove_sibling(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path((person_a, person_b)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (person1_id, person2_id) = normalize_pair(person_a, person_b)?;
    let found = SiblingRepo::deactivate_pair(&state.pool, person1_id, person2_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::Validation(format!(
            "No active sibling link between persons {person_a} and {person_b}"
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}
