//! Repository for the `teachers` table.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher, TeacherWithName};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, person_id, program, is_active, created_at";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Register a person as a teacher in a program.
    ///
    /// Re-registering a previously deactivated teacher reactivates the
    /// existing row.
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let query = format!(
            "INSERT INTO teachers (person_id, program)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_teachers_person_program
             DO UPDATE SET is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(input.person_id)
            .bind(&input.program)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List teachers, optionally filtered by program, with person names.
    pub async fn list(
        pool: &PgPool,
        program: Option<&str>,
    ) -> Result<Vec<TeacherWithName>, sqlx::Error> {
        sqlx::query_as::<_, TeacherWithName>(
            "SELECT t.id, t.person_id, t.program, t.is_active, p.first_name, p.last_name
             FROM teachers t
             JOIN persons p ON p.id = t.person_id
             WHERE ($1::text IS NULL OR t.program = $1)
             ORDER BY p.last_name, p.first_name",
        )
        .bind(program)
        .fetch_all(pool)
        .await
    }

    /// Deactivate a teacher. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE teachers SET is_active = false WHERE id = $1 AND is_active = true")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
