//! Enrollment status machine.
//!
//! Every status write goes through [`validate_transition`]; there is no
//! unvalidated path. A withdrawal closes the enrollment by end-dating it
//! (see the repository layer), so WITHDRAWN and COMPLETED are terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a single enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// Registered but not yet attending.
    Registered,
    /// Actively attending.
    Enrolled,
    /// Temporarily away with intent to return.
    OnLeave,
    /// Finished the program.
    Completed,
    /// Left the program. Terminal.
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Registered => "REGISTERED",
            EnrollmentStatus::Enrolled => "ENROLLED",
            EnrollmentStatus::OnLeave => "ON_LEAVE",
            EnrollmentStatus::Completed => "COMPLETED",
            EnrollmentStatus::Withdrawn => "WITHDRAWN",
        }
    }

    /// Parse a stored status value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "REGISTERED" => Ok(EnrollmentStatus::Registered),
            "ENROLLED" => Ok(EnrollmentStatus::Enrolled),
            "ON_LEAVE" => Ok(EnrollmentStatus::OnLeave),
            "COMPLETED" => Ok(EnrollmentStatus::Completed),
            "WITHDRAWN" => Ok(EnrollmentStatus::Withdrawn),
            other => Err(CoreError::Validation(format!(
                "Unknown enrollment status '{other}'"
            ))),
        }
    }

    /// Statuses this one may transition to.
    pub fn allowed_next(&self) -> &'static [EnrollmentStatus] {
        use EnrollmentStatus::*;
        match self {
            Registered => &[Enrolled, Withdrawn],
            Enrolled => &[OnLeave, Completed, Withdrawn],
            OnLeave => &[Enrolled, Withdrawn],
            Completed => &[],
            Withdrawn => &[],
        }
    }

    /// Whether the status permits no further transitions. Entering a
    /// terminal status closes the enrollment by end-dating it.
    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a status transition against the allow-list.
///
/// Rejects self-transitions and anything not reachable from `from`. Callers
/// must run this before touching the database so an invalid transition fails
/// with no write.
pub fn validate_transition(
    from: EnrollmentStatus,
    to: EnrollmentStatus,
) -> Result<(), CoreError> {
    if from == to {
        return Err(CoreError::Validation(format!(
            "Enrollment is already {from}"
        )));
    }
    if !from.allowed_next().contains(&to) {
        return Err(CoreError::Validation(format!(
            "Invalid enrollment transition {from} -> {to}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use EnrollmentStatus::*;

    #[test]
    fn registered_can_enroll_or_withdraw() {
        assert!(validate_transition(Registered, Enrolled).is_ok());
        assert!(validate_transition(Registered, Withdrawn).is_ok());
        assert!(validate_transition(Registered, Completed).is_err());
    }

    #[test]
    fn enrolled_has_three_exits() {
        assert!(validate_transition(Enrolled, OnLeave).is_ok());
        assert!(validate_transition(Enrolled, Completed).is_ok());
        assert!(validate_transition(Enrolled, Withdrawn).is_ok());
        assert!(validate_transition(Enrolled, Registered).is_err());
    }

    #[test]
    fn leave_returns_to_enrolled() {
        assert!(validate_transition(OnLeave, Enrolled).is_ok());
        assert!(validate_transition(OnLeave, Completed).is_err());
    }

    #[test]
    fn withdrawn_is_terminal() {
        assert!(validate_transition(Withdrawn, Enrolled).is_err());
        assert!(validate_transition(Withdrawn, Registered).is_err());
        assert!(Withdrawn.is_terminal());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(validate_transition(Completed, Enrolled).is_err());
        assert!(Completed.is_terminal());
    }

    #[test]
    fn self_transition_rejected() {
        assert!(validate_transition(Enrolled, Enrolled).is_err());
    }

    #[test]
    fn parse_round_trips() {
        for s in [Registered, Enrolled, OnLeave, Completed, Withdrawn] {
            assert_eq!(EnrollmentStatus::parse(s.as_str()).unwrap(), s);
        }
        assert!(EnrollmentStatus::parse("GRADUATED").is_err());
    }
}
