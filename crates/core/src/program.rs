//! Program constants and program-specific rules.
//!
//! The school runs two independent programs. A person may hold a profile in
//! both at the same time; each profile has its own enrollment history.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the two educational programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Program {
    /// Adult institute. Cohort-based: enrollments belong to a batch.
    Mahad,
    /// Weekend children's school. No batches; grouped by family instead.
    Dugsi,
}

impl Program {
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Mahad => "MAHAD",
            Program::Dugsi => "DUGSI",
        }
    }

    /// Parse a stored program value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "MAHAD" => Ok(Program::Mahad),
            "DUGSI" => Ok(Program::Dugsi),
            other => Err(CoreError::Validation(format!(
                "Unknown program '{other}'. Must be one of: MAHAD, DUGSI"
            ))),
        }
    }

    /// Whether enrollments in this program may reference a batch.
    ///
    /// Dugsi has no cohorts; a Dugsi enrollment carrying a batch id is a
    /// data error and is rejected before any write.
    pub fn supports_batches(&self) -> bool {
        matches!(self, Program::Mahad)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Profile status
// ---------------------------------------------------------------------------

pub const PROFILE_ACTIVE: &str = "ACTIVE";
pub const PROFILE_INACTIVE: &str = "INACTIVE";
pub const PROFILE_WITHDRAWN: &str = "WITHDRAWN";
pub const VALID_PROFILE_STATUSES: &[&str] =
    &[PROFILE_ACTIVE, PROFILE_INACTIVE, PROFILE_WITHDRAWN];

/// Validate that `status` is one of the allowed profile statuses.
pub fn validate_profile_status(status: &str) -> Result<(), CoreError> {
    if VALID_PROFILE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid profile status '{status}'. Must be one of: {}",
            VALID_PROFILE_STATUSES.join(", ")
        )))
    }
}

/// Validate a batch reference against the program rule.
///
/// Returns an error when a batch id is supplied for a program that does not
/// support batches.
pub fn validate_batch_reference(program: Program, batch_id: Option<i64>) -> Result<(), CoreError> {
    if batch_id.is_some() && !program.supports_batches() {
        return Err(CoreError::Validation(format!(
            "{program} enrollments cannot be assigned to a batch"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_programs() {
        assert_eq!(Program::parse("MAHAD").unwrap(), Program::Mahad);
        assert_eq!(Program::parse("DUGSI").unwrap(), Program::Dugsi);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(Program::parse("madrasa").is_err());
        assert!(Program::parse("").is_err());
    }

    #[test]
    fn only_mahad_supports_batches() {
        assert!(Program::Mahad.supports_batches());
        assert!(!Program::Dugsi.supports_batches());
    }

    #[test]
    fn dugsi_batch_reference_rejected() {
        assert!(validate_batch_reference(Program::Dugsi, Some(7)).is_err());
        assert!(validate_batch_reference(Program::Dugsi, None).is_ok());
        assert!(validate_batch_reference(Program::Mahad, Some(7)).is_ok());
    }
}
