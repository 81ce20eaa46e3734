//! Student registration: one transaction creating person, contacts,
//! profile, initial enrollment, and guardian link.

use maktab_db::models::person::CreatePerson;
use maktab_db::models::registration::{GuardianLink, NormalizedContact, RegisterStudent};
use maktab_db::repositories::{ContactRepo, GuardianRepo, PersonRepo, RegistrationRepo};
use sqlx::PgPool;

fn new_person(first: &str) -> CreatePerson {
    CreatePerson {
        first_name: first.to_string(),
        last_name: "Farah".to_string(),
        date_of_birth: None,
        gender: None,
        notes: None,
    }
}

fn registration(first: &str) -> RegisterStudent {
    RegisterStudent {
        existing_person_id: None,
        person: new_person(first),
        contacts: vec![NormalizedContact {
            kind: "PHONE".to_string(),
            value: "+16125550000".to_string(),
            is_primary: true,
        }],
        program: "DUGSI".to_string(),
        education_level: None,
        grade_level: Some("2".to_string()),
        quran_level: Some("Juz Amma".to_string()),
        family_reference_id: None,
        batch_id: None,
        guardian: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn registration_creates_person_profile_and_enrollment(pool: PgPool) {
    let result = RegistrationRepo::register(&pool, &registration("Nimo"))
        .await
        .unwrap();

    assert_eq!(result.person.first_name, "Nimo");
    assert_eq!(result.profile.program, "DUGSI");
    assert_eq!(result.profile.status, "ACTIVE");
    assert_eq!(result.enrollment.status, "REGISTERED");
    assert_eq!(result.enrollment.program_profile_id, result.profile.id);

    let contacts = ContactRepo::list_for_person(&pool, result.person.id)
        .await
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].is_primary);
}

#[sqlx::test(migrations = "./migrations")]
async fn registration_can_attach_to_existing_person(pool: PgPool) {
    let existing = PersonRepo::create(&pool, &new_person("Nimo")).await.unwrap();

    let mut input = registration("ignored");
    input.existing_person_id = Some(existing.id);
    let result = RegistrationRepo::register(&pool, &input).await.unwrap();

    assert_eq!(result.person.id, existing.id);
    // The new-person fields are ignored when attaching.
    assert_eq!(result.person.first_name, "Nimo");
}

#[sqlx::test(migrations = "./migrations")]
async fn registration_links_guardian_when_provided(pool: PgPool) {
    let guardian = PersonRepo::create(&pool, &new_person("Fartun")).await.unwrap();

    let mut input = registration("Nimo");
    input.guardian = Some(GuardianLink {
        guardian_person_id: guardian.id,
        relation: "MOTHER".to_string(),
        is_primary: true,
    });
    let result = RegistrationRepo::register(&pool, &input).await.unwrap();

    let guardians = GuardianRepo::list_for_student(&pool, result.person.id)
        .await
        .unwrap();
    assert_eq!(guardians.len(), 1);
    assert_eq!(guardians[0].guardian_person_id, guardian.id);
    assert_eq!(guardians[0].relation, "MOTHER");
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_registration_rolls_back_entirely(pool: PgPool) {
    let mut input = registration("Nimo");
    // A dangling batch reference makes the enrollment insert fail.
    input.batch_id = Some(99_999);

    assert!(RegistrationRepo::register(&pool, &input).await.is_err());

    let (persons,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM persons")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (profiles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM program_profiles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(persons, 0);
    assert_eq!(profiles, 0);
}
