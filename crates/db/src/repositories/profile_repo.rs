//! Repository for the `program_profiles` table, including the two deletion
//! policies: Mahad profiles are withdrawn in place, Dugsi profiles (and
//! whole families) are hard-deleted with cascades.

use maktab_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::program_profile::{
    CreateProgramProfile, ProfileFilter, ProfileWithName, ProgramProfile, UpdateProgramProfile,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, person_id, program, status, education_level, grade_level, \
                       quran_level, family_reference_id, created_at, updated_at";

/// Provides CRUD and lifecycle operations for program profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProgramProfile,
    ) -> Result<ProgramProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_profiles
                (person_id, program, education_level, grade_level, quran_level, family_reference_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgramProfile>(&query)
            .bind(input.person_id)
            .bind(&input.program)
            .bind(&input.education_level)
            .bind(&input.grade_level)
            .bind(&input.quran_level)
            .bind(input.family_reference_id)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProgramProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM program_profiles WHERE id = $1");
        sqlx::query_as::<_, ProgramProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles matching the filter, joined with person names.
    ///
    /// The batch filter matches profiles with an open enrollment in that
    /// batch.
    pub async fn list(
        pool: &PgPool,
        filter: &ProfileFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileWithName>, sqlx::Error> {
        sqlx::query_as::<_, ProfileWithName>(
            "SELECT pp.id, pp.person_id, pp.program, pp.status, pp.family_reference_id,
                    p.first_name, p.last_name
             FROM program_profiles pp
             JOIN persons p ON p.id = pp.person_id
             WHERE ($1::text IS NULL OR pp.program = $1)
               AND ($2::text IS NULL OR pp.status = $2)
               AND ($3::uuid IS NULL OR pp.family_reference_id = $3)
               AND ($4::bigint IS NULL OR EXISTS(
                        SELECT 1 FROM enrollments e
                        WHERE e.program_profile_id = pp.id
                          AND e.batch_id = $4
                          AND e.end_date IS NULL))
             ORDER BY p.last_name, p.first_name
             LIMIT $5 OFFSET $6",
        )
        .bind(&filter.program)
        .bind(&filter.status)
        .bind(filter.family_reference_id)
        .bind(filter.batch_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Update a profile's academic fields. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgramProfile,
    ) -> Result<Option<ProgramProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE program_profiles SET
                education_level = COALESCE($2, education_level),
                grade_level = COALESCE($3, grade_level),
                quran_level = COALESCE($4, quran_level),
                family_reference_id = COALESCE($5, family_reference_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgramProfile>(&query)
            .bind(id)
            .bind(&input.education_level)
            .bind(&input.grade_level)
            .bind(&input.quran_level)
            .bind(input.family_reference_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a profile's status. Returns `true` if a row was updated.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE program_profiles SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Profile IDs sharing a family reference.
    pub async fn family_member_ids(
        pool: &PgPool,
        family_reference_id: Uuid,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM program_profiles WHERE family_reference_id = $1 ORDER BY id",
        )
        .bind(family_reference_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Profile IDs in a program whose student has a guardian with the given
    /// normalized contact email.
    pub async fn ids_by_guardian_email(
        pool: &PgPool,
        program: &str,
        email: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT pp.id
             FROM program_profiles pp
             JOIN guardian_relationships g
               ON g.student_person_id = pp.person_id AND g.is_active
             JOIN contact_points c
               ON c.person_id = g.guardian_person_id
              AND c.is_active AND c.kind = 'EMAIL'
             WHERE pp.program = $1 AND c.value = $2
             ORDER BY pp.id",
        )
        .bind(program)
        .bind(email)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Withdraw a profile: close its open enrollments, deactivate its
    /// billing assignments, and mark it WITHDRAWN, all in one transaction.
    ///
    /// This is both the Mahad "delete" (audit trail preserved) and the fate
    /// of each duplicate in duplicate resolution.
    ///
    /// Returns `false` without writing anything if the profile does not
    /// exist.
    pub async fn withdraw(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM program_profiles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE enrollments
             SET status = 'WITHDRAWN', end_date = NOW(), updated_at = NOW()
             WHERE program_profile_id = $1 AND end_date IS NULL
               AND status NOT IN ('WITHDRAWN', 'COMPLETED')",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE billing_assignments SET is_active = false
             WHERE program_profile_id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE program_profiles SET status = 'WITHDRAWN', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Hard-delete one profile (Dugsi policy). Cascades enrollments,
    /// assignments, and attendance. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM program_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete every profile sharing a family reference (Dugsi family
    /// deletion). Returns the number of profiles deleted.
    pub async fn delete_family(
        pool: &PgPool,
        family_reference_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM program_profiles WHERE family_reference_id = $1")
            .bind(family_reference_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
