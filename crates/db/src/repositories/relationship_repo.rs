//! Repositories for guardian and sibling relationships.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::relationship::{
    CreateGuardianRelationship, FamilyReferenceGroup, GuardianContactGroup, GuardianRelationship,
    SiblingRelationship,
};

const GUARDIAN_COLUMNS: &str =
    "id, guardian_person_id, student_person_id, relation, is_primary, is_active, created_at";

/// Provides operations on guardian-student links.
pub struct GuardianRepo;

impl GuardianRepo {
    /// Link a guardian to a student. Re-linking a deactivated pair
    /// reactivates it and refreshes the relation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGuardianRelationship,
    ) -> Result<GuardianRelationship, sqlx::Error> {
        let query = format!(
            "INSERT INTO guardian_relationships
                (guardian_person_id, student_person_id, relation, is_primary)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_guardian_pair
             DO UPDATE SET is_active = true,
                           relation = EXCLUDED.relation,
                           is_primary = EXCLUDED.is_primary
             RETURNING {GUARDIAN_COLUMNS}"
        );
        sqlx::query_as::<_, GuardianRelationship>(&query)
            .bind(input.guardian_person_id)
            .bind(input.student_person_id)
            .bind(&input.relation)
            .bind(input.is_primary.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// List a student's active guardians.
    pub async fn list_for_student(
        pool: &PgPool,
        student_person_id: DbId,
    ) -> Result<Vec<GuardianRelationship>, sqlx::Error> {
        let query = format!(
            "SELECT {GUARDIAN_COLUMNS} FROM guardian_relationships
             WHERE student_person_id = $1 AND is_active = true
             ORDER BY is_primary DESC, id"
        );
        sqlx::query_as::<_, GuardianRelationship>(&query)
            .bind(student_person_id)
            .fetch_all(pool)
            .await
    }

    /// List the students an active guardian is responsible for.
    pub async fn list_for_guardian(
        pool: &PgPool,
        guardian_person_id: DbId,
    ) -> Result<Vec<GuardianRelationship>, sqlx::Error> {
        let query = format!(
            "SELECT {GUARDIAN_COLUMNS} FROM guardian_relationships
             WHERE guardian_person_id = $1 AND is_active = true
             ORDER BY id"
        );
        sqlx::query_as::<_, GuardianRelationship>(&query)
            .bind(guardian_person_id)
            .fetch_all(pool)
            .await
    }

    /// Deactivate a guardian link. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE guardian_relationships SET is_active = false
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

const SIBLING_COLUMNS: &str = "id, person1_id, person2_id, detection_method, confidence, \
                               is_active, created_at, updated_at";

/// Provides operations on sibling pairs.
///
/// Pairs are stored sorted (`person1_id < person2_id`); callers normalize
/// with `maktab_core::relationships::normalize_pair` before writing.
pub struct SiblingRepo;

impl SiblingRepo {
    /// Insert a sibling pair, or reactivate/refresh the existing row for the
    /// same sorted pair. Never produces a duplicate pair.
    pub async fn upsert_pair(
        pool: &PgPool,
        person1_id: DbId,
        person2_id: DbId,
        detection_method: &str,
        confidence: f64,
    ) -> Result<SiblingRelationship, sqlx::Error> {
        let query = format!(
            "INSERT INTO sibling_relationships
                (person1_id, person2_id, detection_method, confidence)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_sibling_pair
             DO UPDATE SET is_active = true,
                           detection_method = EXCLUDED.detection_method,
                           confidence = GREATEST(sibling_relationships.confidence,
                                                 EXCLUDED.confidence),
                           updated_at = NOW()
             RETURNING {SIBLING_COLUMNS}"
        );
        sqlx::query_as::<_, SiblingRelationship>(&query)
            .bind(person1_id)
            .bind(person2_id)
            .bind(detection_method)
            .bind(confidence)
            .fetch_one(pool)
            .await
    }

    /// Soft-remove a pair. Returns `true` if a row was updated.
    pub async fn deactivate_pair(
        pool: &PgPool,
        person1_id: DbId,
        person2_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sibling_relationships SET is_active = false, updated_at = NOW()
             WHERE person1_id = $1 AND person2_id = $2 AND is_active = true",
        )
        .bind(person1_id)
        .bind(person2_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a person's active sibling links (either side of the pair).
    pub async fn list_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<SiblingRelationship>, sqlx::Error> {
        let query = format!(
            "SELECT {SIBLING_COLUMNS} FROM sibling_relationships
             WHERE (person1_id = $1 OR person2_id = $1) AND is_active = true
             ORDER BY id"
        );
        sqlx::query_as::<_, SiblingRelationship>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// Groups of persons sharing a `family_reference_id`, for detection.
    pub async fn family_reference_groups(
        pool: &PgPool,
    ) -> Result<Vec<FamilyReferenceGroup>, sqlx::Error> {
        sqlx::query_as::<_, FamilyReferenceGroup>(
            "SELECT family_reference_id, array_agg(DISTINCT person_id) AS person_ids
             FROM program_profiles
             WHERE family_reference_id IS NOT NULL
             GROUP BY family_reference_id
             HAVING COUNT(DISTINCT person_id) > 1",
        )
        .fetch_all(pool)
        .await
    }

    /// Groups of students whose guardians share a contact value, for
    /// detection when no family reference exists.
    pub async fn guardian_contact_groups(
        pool: &PgPool,
    ) -> Result<Vec<GuardianContactGroup>, sqlx::Error> {
        sqlx::query_as::<_, GuardianContactGroup>(
            "SELECT c.value AS contact_value, c.kind AS contact_kind,
                    array_agg(DISTINCT g.student_person_id) AS student_person_ids
             FROM guardian_relationships g
             JOIN contact_points c
               ON c.person_id = g.guardian_person_id AND c.is_active
             WHERE g.is_active
             GROUP BY c.value, c.kind
             HAVING COUNT(DISTINCT g.student_person_id) > 1",
        )
        .fetch_all(pool)
        .await
    }
}
