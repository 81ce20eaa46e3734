//! Handlers for the `/persons` resource: identity records, their contact
//! points, and guardian links.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maktab_core::contact::{normalize_contact_value, validate_contact_kind};
use maktab_core::error::CoreError;
use maktab_core::relationships::validate_relation;
use maktab_core::types::DbId;
use maktab_db::models::contact_point::CreateContactPoint;
use maktab_db::models::person::{CreatePerson, UpdatePerson};
use maktab_db::models::relationship::CreateGuardianRelationship;
use maktab_db::repositories::{ContactRepo, GuardianRepo, PersonRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /persons`.
#[derive(Debug, Deserialize)]
pub struct PersonQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

const MAX_LIMIT: i64 = 200;
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Person CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/persons
pub async fn create_person(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<impl IntoResponse> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "first_name and last_name must not be empty".into(),
        ));
    }

    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(person_id = person.id, "Person created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// GET /api/v1/persons
pub async fn list_persons(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Query(params): Query<PersonQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let persons = PersonRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: persons }))
}

/// GET /api/v1/persons/{id}
///
/// Returns the person with their contact points.
pub async fn get_person(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let person = PersonRepo::find_by_id(&state.pool, person_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id: person_id,
        }))?;
    let contacts = ContactRepo::list_for_person(&state.pool, person_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "person": person, "contacts": contacts }
    })))
}

/// PUT /api/v1/persons/{id}
pub async fn update_person(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<impl IntoResponse> {
    let person = PersonRepo::update(&state.pool, person_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id: person_id,
        }))?;
    Ok(Json(DataResponse { data: person }))
}

// ---------------------------------------------------------------------------
// Contact points
// ---------------------------------------------------------------------------

/// POST /api/v1/persons/{id}/contacts
///
/// Normalizes the value before storing; a new primary demotes the previous
/// primary of the same kind.
pub async fn add_contact(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
    Json(input): Json<CreateContactPoint>,
) -> AppResult<impl IntoResponse> {
    validate_contact_kind(&input.kind)?;
    let value = normalize_contact_value(&input.kind, &input.value)?;

    let contact = ContactRepo::add(
        &state.pool,
        person_id,
        &input.kind,
        &value,
        input.is_primary.unwrap_or(false),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// GET /api/v1/persons/{id}/contacts
pub async fn list_contacts(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contacts = ContactRepo::list_for_person(&state.pool, person_id).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /api/v1/persons/contacts/{contact_id}/primary
pub async fn set_primary_contact(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(contact_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::set_primary(&state.pool, contact_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactPoint",
            id: contact_id,
        }))?;
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/persons/contacts/{contact_id}
pub async fn deactivate_contact(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(contact_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = ContactRepo::deactivate(&state.pool, contact_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ContactPoint",
            id: contact_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Guardians
// ---------------------------------------------------------------------------

/// POST /api/v1/persons/guardians
pub async fn link_guardian(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateGuardianRelationship>,
) -> AppResult<impl IntoResponse> {
    validate_relation(&input.relation)?;
    if input.guardian_person_id == input.student_person_id {
        return Err(AppError::Core(CoreError::Validation(
            "A person cannot be their own guardian".into(),
        )));
    }

    let relationship = GuardianRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: relationship }),
    ))
}

/// GET /api/v1/persons/{id}/guardians
pub async fn list_guardians(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(person_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let guardians = GuardianRepo::list_for_student(&state.pool, person_id).await?;
    Ok(Json(DataResponse { data: guardians }))
}

/// DELETE /api/v1/persons/guardians/{id}
pub async fn unlink_guardian(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Path(relationship_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = GuardianRepo::deactivate(&state.pool, relationship_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GuardianRelationship",
            id: relationship_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
