//! Attendance record model and DTOs.

use chrono::NaiveDate;
use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full attendance row from the `attendance_records` table.
///
/// One row per enrollment per day; re-recording a day overwrites in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub date: NaiveDate,
    pub status: String,
    pub note: Option<String>,
    pub recorded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording attendance for one enrollment on one day.
#[derive(Debug, Deserialize)]
pub struct RecordAttendance {
    pub enrollment_id: DbId,
    pub date: NaiveDate,
    pub status: String,
    pub note: Option<String>,
    pub recorded_by: Option<DbId>,
}
