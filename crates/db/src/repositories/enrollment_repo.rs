//! Repository for the `enrollments` table.
//!
//! Status writes happen only through [`EnrollmentRepo::apply_transition`];
//! callers validate the transition against the allow-list in
//! `maktab_core::enrollment` first, so an invalid transition never reaches
//! the database.

use maktab_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::enrollment::{CreateEnrollment, Enrollment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, program_profile_id, batch_id, status, start_date, end_date, \
                       created_at, updated_at";

/// Provides CRUD and lifecycle operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment in REGISTERED status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnrollment,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (program_profile_id, batch_id, start_date)
             VALUES ($1, $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.program_profile_id)
            .bind(input.batch_id)
            .bind(input.start_date)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The profile's open enrollment, if any: end date unset and status not
    /// terminal. By convention there is at most one.
    pub async fn open_for_profile(
        pool: &PgPool,
        program_profile_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE program_profile_id = $1 AND end_date IS NULL
               AND status NOT IN ('WITHDRAWN', 'COMPLETED')
             ORDER BY start_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(program_profile_id)
            .fetch_optional(pool)
            .await
    }

    /// List a profile's enrollments, newest first.
    pub async fn list_for_profile(
        pool: &PgPool,
        program_profile_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE program_profile_id = $1
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(program_profile_id)
            .fetch_all(pool)
            .await
    }

    /// List a batch's enrollments, open ones first.
    pub async fn list_for_batch(
        pool: &PgPool,
        batch_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE batch_id = $1
             ORDER BY end_date IS NOT NULL, start_date DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Write a validated status transition.
    ///
    /// `end_date` is set for transitions into a terminal status and left
    /// untouched otherwise. Returns `None` if the enrollment vanished
    /// between validation and write.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        status: &str,
        end_date: Option<Timestamp>,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET
                status = $2,
                end_date = COALESCE($3, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(status)
            .bind(end_date)
            .fetch_optional(pool)
            .await
    }

    /// Move an enrollment to a batch (or out of one with `None`).
    pub async fn assign_batch(
        pool: &PgPool,
        id: DbId,
        batch_id: Option<DbId>,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET batch_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(batch_id)
            .fetch_optional(pool)
            .await
    }
}
