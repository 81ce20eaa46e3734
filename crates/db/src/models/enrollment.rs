//! Enrollment entity model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full enrollment row from the `enrollments` table.
///
/// A time-bounded participation record. An enrollment with `end_date` unset
/// and a non-terminal status is the profile's open enrollment; closing one
/// always sets `end_date`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub program_profile_id: DbId,
    pub batch_id: Option<DbId>,
    pub status: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an enrollment.
#[derive(Debug, Deserialize)]
pub struct CreateEnrollment {
    pub program_profile_id: DbId,
    pub batch_id: Option<DbId>,
    pub start_date: Option<Timestamp>,
}

/// DTO for a status transition request.
#[derive(Debug, Deserialize)]
pub struct TransitionEnrollment {
    pub status: String,
    /// Only honored when transitioning into a terminal status; defaults to
    /// now.
    pub end_date: Option<Timestamp>,
}
