//! Student registration: person, contacts, profile, initial enrollment, and
//! guardian link created atomically.

use sqlx::PgPool;

use crate::models::enrollment::Enrollment;
use crate::models::person::Person;
use crate::models::program_profile::ProgramProfile;
use crate::models::registration::{RegisterStudent, RegistrationResult};

/// Orchestrates the multi-table registration write.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register a student in one transaction.
    ///
    /// Inputs are pre-validated and pre-normalized by the caller. Any
    /// statement failing rolls the whole registration back.
    pub async fn register(
        pool: &PgPool,
        input: &RegisterStudent,
    ) -> Result<RegistrationResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let person = match input.existing_person_id {
            Some(id) => {
                sqlx::query_as::<_, Person>(
                    "SELECT id, first_name, last_name, date_of_birth, gender, notes,
                            created_at, updated_at
                     FROM persons WHERE id = $1",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, Person>(
                    "INSERT INTO persons (first_name, last_name, date_of_birth, gender, notes)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING id, first_name, last_name, date_of_birth, gender, notes,
                               created_at, updated_at",
                )
                .bind(&input.person.first_name)
                .bind(&input.person.last_name)
                .bind(input.person.date_of_birth)
                .bind(&input.person.gender)
                .bind(&input.person.notes)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        for contact in &input.contacts {
            if contact.is_primary {
                sqlx::query(
                    "UPDATE contact_points SET is_primary = false
                     WHERE person_id = $1 AND kind = $2 AND is_primary = true",
                )
                .bind(person.id)
                .bind(&contact.kind)
                .execute(&mut *tx)
                .await?;
            }
            sqlx::query(
                "INSERT INTO contact_points (person_id, kind, value, is_primary)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(person.id)
            .bind(&contact.kind)
            .bind(&contact.value)
            .bind(contact.is_primary)
            .execute(&mut *tx)
            .await?;
        }

        let profile = sqlx::query_as::<_, ProgramProfile>(
            "INSERT INTO program_profiles
                (person_id, program, education_level, grade_level, quran_level,
                 family_reference_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, person_id, program, status, education_level, grade_level,
                       quran_level, family_reference_id, created_at, updated_at",
        )
        .bind(person.id)
        .bind(&input.program)
        .bind(&input.education_level)
        .bind(&input.grade_level)
        .bind(&input.quran_level)
        .bind(input.family_reference_id)
        .fetch_one(&mut *tx)
        .await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (program_profile_id, batch_id)
             VALUES ($1, $2)
             RETURNING id, program_profile_id, batch_id, status, start_date, end_date,
                       created_at, updated_at",
        )
        .bind(profile.id)
        .bind(input.batch_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(guardian) = &input.guardian {
            sqlx::query(
                "INSERT INTO guardian_relationships
                    (guardian_person_id, student_person_id, relation, is_primary)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT ON CONSTRAINT uq_guardian_pair
                 DO UPDATE SET is_active = true,
                               relation = EXCLUDED.relation,
                               is_primary = EXCLUDED.is_primary",
            )
            .bind(guardian.guardian_person_id)
            .bind(person.id)
            .bind(&guardian.relation)
            .bind(guardian.is_primary)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(RegistrationResult {
            person,
            profile,
            enrollment,
        })
    }
}
