//! Sibling pair storage invariants: sorted pairs, dedupe, reactivation, and
//! detection groupings.

use maktab_core::relationships::{normalize_pair, DETECTION_GUARDIAN_CONTACT, DETECTION_MANUAL};
use maktab_db::models::person::CreatePerson;
use maktab_db::models::relationship::CreateGuardianRelationship;
use maktab_db::repositories::{ContactRepo, GuardianRepo, PersonRepo, SiblingRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_person(pool: &PgPool, first: &str) -> i64 {
    PersonRepo::create(
        pool,
        &CreatePerson {
            first_name: first.to_string(),
            last_name: "Abdi".to_string(),
            date_of_birth: None,
            gender: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn pair_is_stored_sorted_regardless_of_input_order(pool: PgPool) {
    let a = seed_person(&pool, "Sagal").await;
    let b = seed_person(&pool, "Ubah").await;

    let (p1, p2) = normalize_pair(b, a).unwrap();
    let row = SiblingRepo::upsert_pair(&pool, p1, p2, DETECTION_MANUAL, 1.0)
        .await
        .unwrap();

    assert!(row.person1_id < row.person2_id);
    assert_eq!((row.person1_id, row.person2_id), (a.min(b), a.max(b)));
}

#[sqlx::test(migrations = "./migrations")]
async fn unsorted_insert_violates_check_constraint(pool: PgPool) {
    let a = seed_person(&pool, "Sagal").await;
    let b = seed_person(&pool, "Ubah").await;
    let (low, high) = (a.min(b), a.max(b));

    let result = sqlx::query(
        "INSERT INTO sibling_relationships (person1_id, person2_id, detection_method, confidence)
         VALUES ($1, $2, 'MANUAL', 1.0)",
    )
    .bind(high)
    .bind(low)
    .execute(&pool)
    .await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn redetection_reactivates_instead_of_duplicating(pool: PgPool) {
    let a = seed_person(&pool, "Sagal").await;
    let b = seed_person(&pool, "Ubah").await;
    let (p1, p2) = normalize_pair(a, b).unwrap();

    let original = SiblingRepo::upsert_pair(&pool, p1, p2, DETECTION_MANUAL, 1.0)
        .await
        .unwrap();
    assert!(SiblingRepo::deactivate_pair(&pool, p1, p2).await.unwrap());

    let revived = SiblingRepo::upsert_pair(&pool, p1, p2, DETECTION_GUARDIAN_CONTACT, 0.8)
        .await
        .unwrap();

    assert_eq!(revived.id, original.id);
    assert!(revived.is_active);
    // Confidence never degrades on re-detection.
    assert_eq!(revived.confidence, 1.0);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sibling_relationships")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn shared_guardian_contact_groups_students(pool: PgPool) {
    let guardian = seed_person(&pool, "Amina").await;
    let first = seed_person(&pool, "Sagal").await;
    let second = seed_person(&pool, "Ubah").await;

    ContactRepo::add(&pool, guardian, "PHONE", "+16125551234", true)
        .await
        .unwrap();
    for student in [first, second] {
        GuardianRepo::create(
            &pool,
            &CreateGuardianRelationship {
                guardian_person_id: guardian,
                student_person_id: student,
                relation: "MOTHER".to_string(),
                is_primary: Some(true),
            },
        )
        .await
        .unwrap();
    }

    let groups = SiblingRepo::guardian_contact_groups(&pool).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].contact_value, "+16125551234");

    let mut members = groups[0].student_person_ids.clone();
    members.sort();
    assert_eq!(members, vec![first.min(second), first.max(second)]);
}
