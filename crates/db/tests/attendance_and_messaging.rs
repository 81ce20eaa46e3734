//! Attendance upserts, teacher check-in pairing, and the message-log
//! duplicate window.

use chrono::NaiveDate;
use maktab_db::models::attendance::RecordAttendance;
use maktab_db::models::enrollment::CreateEnrollment;
use maktab_db::models::person::CreatePerson;
use maktab_db::models::program_profile::CreateProgramProfile;
use maktab_db::models::teacher::CreateTeacher;
use maktab_db::repositories::{
    AttendanceRepo, CheckInRepo, EnrollmentRepo, MessageLogRepo, PersonRepo, ProfileRepo,
    TeacherRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_enrollment(pool: &PgPool) -> i64 {
    let person = PersonRepo::create(
        pool,
        &CreatePerson {
            first_name: "Bilal".to_string(),
            last_name: "Omar".to_string(),
            date_of_birth: None,
            gender: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    let profile = ProfileRepo::create(
        pool,
        &CreateProgramProfile {
            person_id: person.id,
            program: "DUGSI".to_string(),
            education_level: None,
            grade_level: None,
            quran_level: None,
            family_reference_id: None,
        },
    )
    .await
    .unwrap();
    EnrollmentRepo::create(
        pool,
        &CreateEnrollment {
            program_profile_id: profile.id,
            batch_id: None,
            start_date: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_teacher(pool: &PgPool) -> i64 {
    let person = PersonRepo::create(
        pool,
        &CreatePerson {
            first_name: "Ustadh".to_string(),
            last_name: "Ismail".to_string(),
            date_of_birth: None,
            gender: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    TeacherRepo::create(
        pool,
        &CreateTeacher {
            person_id: person.id,
            program: "MAHAD".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn rerecording_a_day_overwrites_in_place(pool: PgPool) {
    let enrollment = seed_enrollment(&pool).await;
    let day = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

    let first = AttendanceRepo::upsert(
        &pool,
        &RecordAttendance {
            enrollment_id: enrollment,
            date: day,
            status: "ABSENT".to_string(),
            note: None,
            recorded_by: None,
        },
    )
    .await
    .unwrap();

    let corrected = AttendanceRepo::upsert(
        &pool,
        &RecordAttendance {
            enrollment_id: enrollment,
            date: day,
            status: "LATE".to_string(),
            note: Some("arrived 9:40".to_string()),
            recorded_by: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(corrected.id, first.id);
    assert_eq!(corrected.status, "LATE");

    let records = AttendanceRepo::list_for_enrollment(&pool, enrollment)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
}

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn check_in_then_out_closes_the_open_row(pool: PgPool) {
    let teacher = seed_teacher(&pool).await;

    let opened = CheckInRepo::check_in(&pool, teacher, Some("Saturday morning"))
        .await
        .unwrap();
    assert!(opened.checked_out_at.is_none());
    assert!(CheckInRepo::open_for_teacher(&pool, teacher)
        .await
        .unwrap()
        .is_some());

    let closed = CheckInRepo::check_out(&pool, teacher).await.unwrap().unwrap();
    assert_eq!(closed.id, opened.id);
    assert!(closed.checked_out_at.is_some());
    assert!(CheckInRepo::open_for_teacher(&pool, teacher)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn check_out_without_open_check_in_returns_none(pool: PgPool) {
    let teacher = seed_teacher(&pool).await;
    assert!(CheckInRepo::check_out(&pool, teacher).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Message log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_window_sees_recent_sent_messages_only(pool: PgPool) {
    MessageLogRepo::record(
        &pool,
        "+16125550000",
        "WHATSAPP",
        "attendance_reminder",
        "SENT",
        None,
    )
    .await
    .unwrap();

    assert!(
        MessageLogRepo::sent_within(&pool, "+16125550000", "attendance_reminder", 24)
            .await
            .unwrap()
    );
    // A different template or recipient does not trip the window.
    assert!(
        !MessageLogRepo::sent_within(&pool, "+16125550000", "fee_reminder", 24)
            .await
            .unwrap()
    );
    assert!(
        !MessageLogRepo::sent_within(&pool, "+16125559999", "attendance_reminder", 24)
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_and_suppressed_attempts_do_not_trip_the_window(pool: PgPool) {
    MessageLogRepo::record(
        &pool,
        "+16125550000",
        "WHATSAPP",
        "fee_reminder",
        "FAILED",
        Some("provider 500"),
    )
    .await
    .unwrap();
    MessageLogRepo::record(
        &pool,
        "+16125550000",
        "WHATSAPP",
        "fee_reminder",
        "SUPPRESSED",
        None,
    )
    .await
    .unwrap();

    assert!(
        !MessageLogRepo::sent_within(&pool, "+16125550000", "fee_reminder", 24)
            .await
            .unwrap()
    );
}
