//! Repository for the `persons` table.

use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, PersonLookupHit, UpdatePerson};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, date_of_birth, gender, notes, created_at, updated_at";

/// Provides CRUD and lookup operations for persons.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (first_name, last_name, date_of_birth, gender, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a person by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all persons ordered by last name.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persons
             ORDER BY last_name, first_name
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a person. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                date_of_birth = COALESCE($4, date_of_birth),
                gender = COALESCE($5, gender),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Multi-role lookup: match a name prefix or an exact normalized contact
    /// value, returning role flags per hit.
    ///
    /// `name_pattern` is an ILIKE pattern (`"fatima%"`); `phone` and `email`
    /// are normalized candidate values derived from the raw query, either of
    /// which may be absent.
    pub async fn lookup(
        pool: &PgPool,
        name_pattern: &str,
        phone: Option<&str>,
        email: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PersonLookupHit>, sqlx::Error> {
        sqlx::query_as::<_, PersonLookupHit>(
            "SELECT p.id, p.first_name, p.last_name,
                EXISTS(SELECT 1 FROM program_profiles pp
                       WHERE pp.person_id = p.id) AS is_student,
                EXISTS(SELECT 1 FROM teachers t
                       WHERE t.person_id = p.id AND t.is_active) AS is_teacher,
                EXISTS(SELECT 1 FROM guardian_relationships g
                       WHERE g.guardian_person_id = p.id AND g.is_active) AS is_parent
             FROM persons p
             WHERE p.first_name ILIKE $1
                OR p.last_name ILIKE $1
                OR EXISTS(SELECT 1 FROM contact_points c
                          WHERE c.person_id = p.id
                            AND c.is_active
                            AND (c.value = $2 OR c.value = $3))
             ORDER BY p.last_name, p.first_name
             LIMIT $4",
        )
        .bind(name_pattern)
        .bind(phone)
        .bind(email)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
