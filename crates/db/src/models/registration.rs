//! Student registration input and result types.
//!
//! These are internal, pre-validated shapes: the API layer normalizes
//! contact values and checks program rules before building them.

use maktab_core::types::DbId;
use serde::Serialize;
use uuid::Uuid;

use crate::models::enrollment::Enrollment;
use crate::models::person::{CreatePerson, Person};
use crate::models::program_profile::ProgramProfile;

/// A contact value that has already been normalized for storage.
#[derive(Debug, Clone)]
pub struct NormalizedContact {
    pub kind: String,
    pub value: String,
    pub is_primary: bool,
}

/// An optional guardian link created during registration.
#[derive(Debug, Clone)]
pub struct GuardianLink {
    pub guardian_person_id: DbId,
    pub relation: String,
    pub is_primary: bool,
}

/// Everything needed to register a student in one transaction.
#[derive(Debug)]
pub struct RegisterStudent {
    /// Attach to this person instead of creating a new one.
    pub existing_person_id: Option<DbId>,
    /// New person fields; ignored when `existing_person_id` is set.
    pub person: CreatePerson,
    pub contacts: Vec<NormalizedContact>,
    pub program: String,
    pub education_level: Option<String>,
    pub grade_level: Option<String>,
    pub quran_level: Option<String>,
    pub family_reference_id: Option<Uuid>,
    pub batch_id: Option<DbId>,
    pub guardian: Option<GuardianLink>,
}

/// The rows created by a successful registration.
#[derive(Debug, Serialize)]
pub struct RegistrationResult {
    pub person: Person,
    pub profile: ProgramProfile,
    pub enrollment: Enrollment,
}
