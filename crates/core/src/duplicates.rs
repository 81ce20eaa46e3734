//! Duplicate profile resolution planning.
//!
//! Resolving duplicates is a soft merge: the kept profile is untouched and
//! every duplicate is withdrawn (enrollments closed, billing assignments
//! deactivated, profile status set to WITHDRAWN). No field-level data is
//! merged. Failures are collected per record, not rolled back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// A validated request to resolve a set of duplicate profiles.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionRequest {
    /// The profile that survives.
    pub keep_profile_id: DbId,
    /// Profiles to withdraw as duplicates of `keep_profile_id`.
    pub duplicate_profile_ids: Vec<DbId>,
}

/// Outcome of a best-effort resolution run.
#[derive(Debug, Default, Serialize)]
pub struct ResolutionOutcome {
    /// Duplicate profile ids that were fully withdrawn.
    pub resolved: Vec<DbId>,
    /// Duplicate profile ids that failed, with the per-record error message.
    pub failed: Vec<FailedResolution>,
}

#[derive(Debug, Serialize)]
pub struct FailedResolution {
    pub profile_id: DbId,
    pub error: String,
}

/// Validate the shape of a resolution request before any database work.
///
/// The duplicate set must be non-empty, must not contain the kept profile,
/// and must not contain repeats.
pub fn validate_resolution_request(req: &ResolutionRequest) -> Result<(), CoreError> {
    if req.duplicate_profile_ids.is_empty() {
        return Err(CoreError::Validation(
            "At least one duplicate profile id is required".into(),
        ));
    }
    if req.duplicate_profile_ids.contains(&req.keep_profile_id) {
        return Err(CoreError::Validation(
            "The kept profile cannot also be listed as a duplicate".into(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    for id in &req.duplicate_profile_ids {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "Duplicate profile id {id} listed more than once"
            )));
        }
    }
    Ok(())
}
