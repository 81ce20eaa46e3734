//! Student registration: one validated request creating the person,
//! contacts, program profile, initial enrollment, and guardian link
//! atomically.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use maktab_core::contact::{normalize_contact_value, validate_contact_kind};
use maktab_core::program::{validate_batch_reference, Program};
use maktab_core::relationships::validate_relation;
use maktab_core::types::DbId;
use maktab_db::models::person::CreatePerson;
use maktab_db::models::registration::{
    GuardianLink, NormalizedContact, RegisterStudent,
};
use maktab_db::repositories::RegistrationRepo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /students`.
#[derive(Debug, Deserialize)]
pub struct RegisterStudentRequest {
    /// Attach to this person instead of creating a new one.
    pub existing_person_id: Option<DbId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
    pub program: String,
    pub education_level: Option<String>,
    pub grade_level: Option<String>,
    pub quran_level: Option<String>,
    pub family_reference_id: Option<Uuid>,
    /// Mahad only.
    pub batch_id: Option<DbId>,
    pub guardian: Option<GuardianInput>,
}

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub kind: String,
    pub value: String,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct GuardianInput {
    pub guardian_person_id: DbId,
    pub relation: String,
    pub is_primary: Option<bool>,
}

/// POST /api/v1/students
///
/// Validates everything up front, then hands the pre-normalized input to
/// the registration transaction.
pub async fn register_student(
    _auth: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<RegisterStudentRequest>,
) -> AppResult<impl IntoResponse> {
    let program = Program::parse(&input.program)?;
    validate_batch_reference(program, input.batch_id)?;

    if input.existing_person_id.is_none() {
        let named = input
            .first_name
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
            && input
                .last_name
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty());
        if !named {
            return Err(AppError::BadRequest(
                "first_name and last_name are required for a new person".into(),
            ));
        }
    }

    let mut contacts = Vec::with_capacity(input.contacts.len());
    for contact in &input.contacts {
        validate_contact_kind(&contact.kind)?;
        let value = normalize_contact_value(&contact.kind, &contact.value)?;
        contacts.push(NormalizedContact {
            kind: contact.kind.clone(),
            value,
            is_primary: contact.is_primary.unwrap_or(false),
        });
    }

    let guardian = match &input.guardian {
        Some(guardian) => {
            validate_relation(&guardian.relation)?;
            Some(GuardianLink {
                guardian_person_id: guardian.guardian_person_id,
                relation: guardian.relation.clone(),
                is_primary: guardian.is_primary.unwrap_or(true),
            })
        }
        None => None,
    };

    let registration = RegisterStudent {
        existing_person_id: input.existing_person_id,
        person: CreatePerson {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            notes: None,
        },
        contacts,
        program: program.as_str().to_string(),
        education_level: input.education_level,
        grade_level: input.grade_level,
        quran_level: input.quran_level,
        family_reference_id: input.family_reference_id,
        batch_id: input.batch_id,
        guardian,
    };

    let result = RegistrationRepo::register(&state.pool, &registration).await?;
    tracing::info!(
        person_id = result.person.id,
        profile_id = result.profile.id,
        program = %program,
        "Student registered",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}
