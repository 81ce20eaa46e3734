//! Person entity model and DTOs.

use chrono::NaiveDate;
use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full person row from the `persons` table.
///
/// A person is a canonical identity: the same row backs a student, a
/// teacher, and a guardian role at the same time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new person.
#[derive(Debug, Deserialize)]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing person. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

/// A lookup hit with role flags computed per row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonLookupHit {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub is_student: bool,
    pub is_teacher: bool,
    pub is_parent: bool,
}
