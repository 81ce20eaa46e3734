//! Repository for the `batches` table.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::batch::{Batch, BatchWithCount, CreateBatch, UpdateBatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, program, description, is_active, created_at";

/// Provides CRUD operations for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new batch, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBatch) -> Result<Batch, sqlx::Error> {
        let query = format!(
            "INSERT INTO batches (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a batch by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches WHERE id = $1");
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List batches with their open-enrollment counts.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<BatchWithCount>, sqlx::Error> {
        sqlx::query_as::<_, BatchWithCount>(
            "SELECT b.id, b.name, b.program, b.description, b.is_active,
                COUNT(e.id) FILTER (WHERE e.end_date IS NULL
                                      AND e.status NOT IN ('WITHDRAWN', 'COMPLETED'))
                    AS open_enrollments
             FROM batches b
             LEFT JOIN enrollments e ON e.batch_id = b.id
             GROUP BY b.id
             ORDER BY b.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a batch. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBatch,
    ) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!(
            "UPDATE batches SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Number of open enrollments currently pointing at this batch.
    pub async fn open_enrollment_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments
             WHERE batch_id = $1 AND end_date IS NULL
               AND status NOT IN ('WITHDRAWN', 'COMPLETED')",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Hard-delete a batch. Returns `true` if a row was deleted.
    ///
    /// Callers must reject deletion while open enrollments reference the
    /// batch; see [`BatchRepo::open_enrollment_count`].
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
