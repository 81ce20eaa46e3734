//! Enrollment lifecycle against a real database: registration status,
//! transitions, batch assignment, and open-enrollment resolution.

use maktab_core::enrollment::{validate_transition, EnrollmentStatus};
use maktab_db::models::batch::CreateBatch;
use maktab_db::models::enrollment::CreateEnrollment;
use maktab_db::models::person::CreatePerson;
use maktab_db::models::program_profile::CreateProgramProfile;
use maktab_db::repositories::{BatchRepo, EnrollmentRepo, PersonRepo, ProfileRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_person(first: &str, last: &str) -> CreatePerson {
    CreatePerson {
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: None,
        gender: None,
        notes: None,
    }
}

async fn seed_profile(pool: &PgPool, program: &str) -> i64 {
    let person = PersonRepo::create(pool, &new_person("Ayaan", "Hassan"))
        .await
        .unwrap();
    let profile = ProfileRepo::create(
        pool,
        &CreateProgramProfile {
            person_id: person.id,
            program: program.to_string(),
            education_level: None,
            grade_level: None,
            quran_level: None,
            family_reference_id: None,
        },
    )
    .await
    .unwrap();
    profile.id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn new_enrollment_starts_registered_and_open(pool: PgPool) {
    let profile_id = seed_profile(&pool, "MAHAD").await;

    let enrollment = EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            program_profile_id: profile_id,
            batch_id: None,
            start_date: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(enrollment.status, "REGISTERED");
    assert!(enrollment.end_date.is_none());

    let open = EnrollmentRepo::open_for_profile(&pool, profile_id)
        .await
        .unwrap();
    assert_eq!(open.unwrap().id, enrollment.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn withdrawal_sets_end_date(pool: PgPool) {
    let profile_id = seed_profile(&pool, "MAHAD").await;
    let enrollment = EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            program_profile_id: profile_id,
            batch_id: None,
            start_date: None,
        },
    )
    .await
    .unwrap();

    let from = EnrollmentStatus::parse(&enrollment.status).unwrap();
    validate_transition(from, EnrollmentStatus::Withdrawn).unwrap();

    let updated = EnrollmentRepo::apply_transition(
        &pool,
        enrollment.id,
        EnrollmentStatus::Withdrawn.as_str(),
        Some(chrono::Utc::now()),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, "WITHDRAWN");
    assert!(updated.end_date.is_some());

    // A withdrawn enrollment is no longer the open one.
    let open = EnrollmentRepo::open_for_profile(&pool, profile_id)
        .await
        .unwrap();
    assert!(open.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn invalid_transition_is_rejected_before_any_write(pool: PgPool) {
    let profile_id = seed_profile(&pool, "MAHAD").await;
    let enrollment = EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            program_profile_id: profile_id,
            batch_id: None,
            start_date: None,
        },
    )
    .await
    .unwrap();

    let withdrawn = EnrollmentRepo::apply_transition(
        &pool,
        enrollment.id,
        EnrollmentStatus::Withdrawn.as_str(),
        Some(chrono::Utc::now()),
    )
    .await
    .unwrap()
    .unwrap();

    // WITHDRAWN -> ENROLLED is off the allow-list; the write never happens.
    let from = EnrollmentStatus::parse(&withdrawn.status).unwrap();
    assert!(validate_transition(from, EnrollmentStatus::Enrolled).is_err());

    let current = EnrollmentRepo::find_by_id(&pool, enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, "WITHDRAWN");
}

#[sqlx::test(migrations = "./migrations")]
async fn batch_assignment_and_open_counts(pool: PgPool) {
    let profile_id = seed_profile(&pool, "MAHAD").await;
    let batch = BatchRepo::create(
        &pool,
        &CreateBatch {
            name: "Cohort 2026A".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let enrollment = EnrollmentRepo::create(
        &pool,
        &CreateEnrollment {
            program_profile_id: profile_id,
            batch_id: None,
            start_date: None,
        },
    )
    .await
    .unwrap();

    let moved = EnrollmentRepo::assign_batch(&pool, enrollment.id, Some(batch.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.batch_id, Some(batch.id));

    assert_eq!(
        BatchRepo::open_enrollment_count(&pool, batch.id).await.unwrap(),
        1
    );

    // Withdrawing drops the batch's open count back to zero.
    EnrollmentRepo::apply_transition(
        &pool,
        enrollment.id,
        EnrollmentStatus::Withdrawn.as_str(),
        Some(chrono::Utc::now()),
    )
    .await
    .unwrap();
    assert_eq!(
        BatchRepo::open_enrollment_count(&pool, batch.id).await.unwrap(),
        0
    );
}
