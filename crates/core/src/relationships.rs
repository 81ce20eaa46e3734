//! Family relationship rules: guardian relations and sibling pairs.
//!
//! Sibling rows are stored once per unordered pair, normalized so that
//! `person1_id < person2_id`. Detection never inserts a duplicate pair; a
//! soft-removed pair is reactivated instead.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Guardian relations
// ---------------------------------------------------------------------------

pub const RELATION_MOTHER: &str = "MOTHER";
pub const RELATION_FATHER: &str = "FATHER";
pub const RELATION_GUARDIAN: &str = "GUARDIAN";
pub const RELATION_OTHER: &str = "OTHER";
pub const VALID_RELATIONS: &[&str] = &[
    RELATION_MOTHER,
    RELATION_FATHER,
    RELATION_GUARDIAN,
    RELATION_OTHER,
];

/// Validate that `relation` is one of the allowed guardian relations.
pub fn validate_relation(relation: &str) -> Result<(), CoreError> {
    if VALID_RELATIONS.contains(&relation) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid relation '{relation}'. Must be one of: {}",
            VALID_RELATIONS.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Sibling detection
// ---------------------------------------------------------------------------

pub const DETECTION_MANUAL: &str = "MANUAL";
pub const DETECTION_FAMILY_REFERENCE: &str = "FAMILY_REFERENCE";
pub const DETECTION_GUARDIAN_CONTACT: &str = "GUARDIAN_CONTACT";
pub const VALID_DETECTION_METHODS: &[&str] = &[
    DETECTION_MANUAL,
    DETECTION_FAMILY_REFERENCE,
    DETECTION_GUARDIAN_CONTACT,
];

/// Confidence assigned to a shared `family_reference_id` match.
pub const CONFIDENCE_FAMILY_REFERENCE: f64 = 1.0;
/// Confidence assigned to a shared guardian email match.
pub const CONFIDENCE_GUARDIAN_EMAIL: f64 = 0.9;
/// Confidence assigned to a shared guardian phone match.
pub const CONFIDENCE_GUARDIAN_PHONE: f64 = 0.8;
/// Confidence recorded for manually entered pairs.
pub const CONFIDENCE_MANUAL: f64 = 1.0;

/// Validate that `method` is one of the allowed detection methods.
pub fn validate_detection_method(method: &str) -> Result<(), CoreError> {
    if VALID_DETECTION_METHODS.contains(&method) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid detection method '{method}'. Must be one of: {}",
            VALID_DETECTION_METHODS.join(", ")
        )))
    }
}

/// Validate that `confidence` lies in `[0.0, 1.0]`.
pub fn validate_confidence(confidence: f64) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(CoreError::Validation(format!(
            "Sibling confidence must be between 0.0 and 1.0, got {confidence}"
        )));
    }
    Ok(())
}

/// Normalize an unordered sibling pair to storage order.
///
/// Rejects self-pairs; returns `(low, high)` otherwise.
pub fn normalize_pair(a: DbId, b: DbId) -> Result<(DbId, DbId), CoreError> {
    if a == b {
        return Err(CoreError::Validation(
            "A person cannot be their own sibling".into(),
        ));
    }
    Ok(if a < b { (a, b) } else { (b, a) })
}

/// A sibling pair proposed by detection, before persistence.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SiblingCandidate {
    pub person1_id: DbId,
    pub person2_id: DbId,
    pub detection_method: &'static str,
    pub confidence: f64,
}

/// Build sibling candidates from groups of person ids that share a family
/// signal (a family reference or a guardian contact).
///
/// Every unordered pair inside a group becomes one candidate; pairs seen in
/// an earlier group are not emitted again, so a family-reference match
/// shadows a weaker guardian-contact match for the same pair.
pub fn pair_candidates(
    groups: &[(Vec<DbId>, &'static str, f64)],
) -> Vec<SiblingCandidate> {
    let mut seen = std::collections::HashSet::new();
    let mut candidates = Vec::new();

    for (members, method, confidence) in groups {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let Ok((p1, p2)) = normalize_pair(members[i], members[j]) else {
                    continue;
                };
                if seen.insert((p1, p2)) {
                    candidates.push(SiblingCandidate {
                        person1_id: p1,
                        person2_id: p2,
                        detection_method: method,
                        confidence: *confidence,
                    });
                }
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_orders_pair() {
        assert_eq!(normalize_pair(9, 4).unwrap(), (4, 9));
        assert_eq!(normalize_pair(4, 9).unwrap(), (4, 9));
    }

    #[test]
    fn normalize_rejects_self_pair() {
        assert!(normalize_pair(3, 3).is_err());
    }

    #[test]
    fn validate_confidence_bounds() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(-0.1).is_err());
        assert!(validate_confidence(1.1).is_err());
    }

    #[test]
    fn candidates_cover_all_pairs_in_group() {
        let groups = vec![(vec![1, 2, 3], DETECTION_FAMILY_REFERENCE, 1.0)];
        let candidates = pair_candidates(&groups);
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.person1_id < c.person2_id));
    }

    #[test]
    fn stronger_signal_shadows_weaker_for_same_pair() {
        let groups = vec![
            (vec![1, 2], DETECTION_FAMILY_REFERENCE, CONFIDENCE_FAMILY_REFERENCE),
            (vec![2, 1], DETECTION_GUARDIAN_CONTACT, CONFIDENCE_GUARDIAN_PHONE),
        ];
        let candidates = pair_candidates(&groups);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].detection_method, DETECTION_FAMILY_REFERENCE);
    }

    #[test]
    fn self_pairs_in_group_input_are_skipped() {
        let groups = vec![(vec![5, 5, 6], DETECTION_GUARDIAN_CONTACT, 0.8)];
        let candidates = pair_candidates(&groups);
        assert_eq!(candidates.len(), 1);
        assert_eq!((candidates[0].person1_id, candidates[0].person2_id), (5, 6));
    }
}
