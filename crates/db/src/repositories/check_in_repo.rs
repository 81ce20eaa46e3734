//! Repository for the `teacher_check_ins` table.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::check_in::TeacherCheckIn;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, teacher_id, checked_in_at, checked_out_at, note";

/// Provides operations for teacher check-ins.
pub struct CheckInRepo;

impl CheckInRepo {
    /// The teacher's open check-in, if any.
    pub async fn open_for_teacher(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Option<TeacherCheckIn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_check_ins
             WHERE teacher_id = $1 AND checked_out_at IS NULL
             ORDER BY checked_in_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, TeacherCheckIn>(&query)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Open a new check-in.
    pub async fn check_in(
        pool: &PgPool,
        teacher_id: DbId,
        note: Option<&str>,
    ) -> Result<TeacherCheckIn, sqlx::Error> {
        let query = format!(
            "INSERT INTO teacher_check_ins (teacher_id, note)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeacherCheckIn>(&query)
            .bind(teacher_id)
            .bind(note)
            .fetch_one(pool)
            .await
    }

    /// Close the teacher's open check-in. Returns `None` when there is none.
    pub async fn check_out(
        pool: &PgPool,
        teacher_id: DbId,
    ) -> Result<Option<TeacherCheckIn>, sqlx::Error> {
        let query = format!(
            "UPDATE teacher_check_ins SET checked_out_at = NOW()
             WHERE id = (SELECT id FROM teacher_check_ins
                         WHERE teacher_id = $1 AND checked_out_at IS NULL
                         ORDER BY checked_in_at DESC
                         LIMIT 1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeacherCheckIn>(&query)
            .bind(teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent check-ins across all teachers.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TeacherCheckIn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teacher_check_ins
             ORDER BY checked_in_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, TeacherCheckIn>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
