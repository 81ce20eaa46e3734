//! Guardian and sibling relationship models and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full guardian relationship row from the `guardian_relationships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GuardianRelationship {
    pub id: DbId,
    pub guardian_person_id: DbId,
    pub student_person_id: DbId,
    pub relation: String,
    pub is_primary: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for linking a guardian to a student.
#[derive(Debug, Deserialize)]
pub struct CreateGuardianRelationship {
    pub guardian_person_id: DbId,
    pub student_person_id: DbId,
    pub relation: String,
    pub is_primary: Option<bool>,
}

/// Full sibling relationship row from the `sibling_relationships` table.
///
/// Stored once per unordered pair with `person1_id < person2_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiblingRelationship {
    pub id: DbId,
    pub person1_id: DbId,
    pub person2_id: DbId,
    pub detection_method: String,
    pub confidence: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for manually recording a sibling pair.
#[derive(Debug, Deserialize)]
pub struct CreateSiblingRelationship {
    pub person_a_id: DbId,
    pub person_b_id: DbId,
}

/// A family-signal grouping row used by sibling detection: profiles that
/// share a guardian contact value.
#[derive(Debug, Clone, FromRow)]
pub struct GuardianContactGroup {
    pub contact_value: String,
    pub contact_kind: String,
    pub student_person_ids: Vec<DbId>,
}

/// A family-reference grouping row used by sibling detection.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyReferenceGroup {
    pub family_reference_id: uuid::Uuid,
    pub person_ids: Vec<DbId>,
}
