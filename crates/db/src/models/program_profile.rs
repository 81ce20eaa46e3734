//! Program profile entity model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full program profile row from the `program_profiles` table.
///
/// A person's participation record in one program. The academic fields are
/// program-specific: Mahad uses `education_level`, Dugsi uses `grade_level`
/// and `quran_level`. `family_reference_id` groups Dugsi households.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramProfile {
    pub id: DbId,
    pub person_id: DbId,
    pub program: String,
    pub status: String,
    pub education_level: Option<String>,
    pub grade_level: Option<String>,
    pub quran_level: Option<String>,
    pub family_reference_id: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a program profile.
#[derive(Debug, Deserialize)]
pub struct CreateProgramProfile {
    pub person_id: DbId,
    pub program: String,
    pub education_level: Option<String>,
    pub grade_level: Option<String>,
    pub quran_level: Option<String>,
    pub family_reference_id: Option<Uuid>,
}

/// DTO for updating a program profile's academic fields.
#[derive(Debug, Deserialize)]
pub struct UpdateProgramProfile {
    pub education_level: Option<String>,
    pub grade_level: Option<String>,
    pub quran_level: Option<String>,
    pub family_reference_id: Option<Uuid>,
}

/// Filters for profile listings.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFilter {
    pub program: Option<String>,
    pub status: Option<String>,
    pub batch_id: Option<DbId>,
    pub family_reference_id: Option<Uuid>,
}

/// Profile row joined with the person's name for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileWithName {
    pub id: DbId,
    pub person_id: DbId,
    pub program: String,
    pub status: String,
    pub family_reference_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
}
