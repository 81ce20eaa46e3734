//! Teacher entity model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full teacher row from the `teachers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub person_id: DbId,
    pub program: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for registering a person as a teacher in a program.
#[derive(Debug, Deserialize)]
pub struct CreateTeacher {
    pub person_id: DbId,
    pub program: String,
}

/// Teacher row joined with the person's name for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeacherWithName {
    pub id: DbId,
    pub person_id: DbId,
    pub program: String,
    pub is_active: bool,
    pub first_name: String,
    pub last_name: String,
}
