//! Teacher check-in model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full check-in row from the `teacher_check_ins` table.
///
/// A row with `checked_out_at` unset is an open check-in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeacherCheckIn {
    pub id: DbId,
    pub teacher_id: DbId,
    pub checked_in_at: Timestamp,
    pub checked_out_at: Option<Timestamp>,
    pub note: Option<String>,
}

/// DTO for a check-in request.
#[derive(Debug, Deserialize)]
pub struct CreateCheckIn {
    pub note: Option<String>,
}
