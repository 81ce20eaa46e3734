//! Repository for the `contact_points` table.
//!
//! The one-primary-per-kind invariant is enforced here, not by a schema
//! constraint: every promotion demotes the previous primary inside the same
//! transaction.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_point::ContactPoint;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, person_id, kind, value, is_primary, is_active, created_at";

/// Provides CRUD operations for contact points.
pub struct ContactRepo;

impl ContactRepo {
    /// Add a contact point. `value` must already be normalized.
    ///
    /// When `is_primary` is set, any existing primary active contact of the
    /// same kind is demoted in the same transaction.
    pub async fn add(
        pool: &PgPool,
        person_id: DbId,
        kind: &str,
        value: &str,
        is_primary: bool,
    ) -> Result<ContactPoint, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if is_primary {
            sqlx::query(
                "UPDATE contact_points SET is_primary = false
                 WHERE person_id = $1 AND kind = $2 AND is_primary = true",
            )
            .bind(person_id)
            .bind(kind)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "INSERT INTO contact_points (person_id, kind, value, is_primary)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let contact = sqlx::query_as::<_, ContactPoint>(&query)
            .bind(person_id)
            .bind(kind)
            .bind(value)
            .bind(is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contact)
    }

    /// List a person's contact points, primaries first.
    pub async fn list_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<ContactPoint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_points
             WHERE person_id = $1
             ORDER BY kind, is_primary DESC, created_at"
        );
        sqlx::query_as::<_, ContactPoint>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// Promote an existing contact point to primary, demoting the previous
    /// primary of the same kind.
    ///
    /// Returns `None` if the contact point does not exist.
    pub async fn set_primary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactPoint>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM contact_points WHERE id = $1");
        let Some(existing) = sqlx::query_as::<_, ContactPoint>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE contact_points SET is_primary = false
             WHERE person_id = $1 AND kind = $2 AND is_primary = true AND id <> $3",
        )
        .bind(existing.person_id)
        .bind(&existing.kind)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE contact_points SET is_primary = true, is_active = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let promoted = sqlx::query_as::<_, ContactPoint>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(promoted))
    }

    /// Deactivate a contact point. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contact_points SET is_active = false, is_primary = false
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the primary active contact of a kind for a person.
    pub async fn find_primary(
        pool: &PgPool,
        person_id: DbId,
        kind: &str,
    ) -> Result<Option<ContactPoint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_points
             WHERE person_id = $1 AND kind = $2 AND is_primary = true AND is_active = true"
        );
        sqlx::query_as::<_, ContactPoint>(&query)
            .bind(person_id)
            .bind(kind)
            .fetch_optional(pool)
            .await
    }
}
