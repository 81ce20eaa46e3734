//! Contact point entity model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full contact point row from the `contact_points` table.
///
/// `value` is stored normalized (E.164 phones, lowercased emails); raw input
/// never reaches the table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactPoint {
    pub id: DbId,
    pub person_id: DbId,
    pub kind: String,
    pub value: String,
    pub is_primary: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for adding a contact point to a person.
#[derive(Debug, Deserialize)]
pub struct CreateContactPoint {
    pub kind: String,
    pub value: String,
    pub is_primary: Option<bool>,
}
