//! Attendance status constants and validation.

use crate::error::CoreError;

pub const ATTENDANCE_PRESENT: &str = "PRESENT";
pub const ATTENDANCE_ABSENT: &str = "ABSENT";
pub const ATTENDANCE_LATE: &str = "LATE";
pub const ATTENDANCE_EXCUSED: &str = "EXCUSED";
pub const VALID_ATTENDANCE_STATUSES: &[&str] = &[
    ATTENDANCE_PRESENT,
    ATTENDANCE_ABSENT,
    ATTENDANCE_LATE,
    ATTENDANCE_EXCUSED,
];

/// Validate that `status` is one of the allowed attendance statuses.
pub fn validate_attendance_status(status: &str) -> Result<(), CoreError> {
    if VALID_ATTENDANCE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid attendance status '{status}'. Must be one of: {}",
            VALID_ATTENDANCE_STATUSES.join(", ")
        )))
    }
}
