pub mod attendance;
pub mod batches;
pub mod billing;
pub mod check_ins;
pub mod enrollments;
pub mod families;
pub mod health;
pub mod lookup;
pub mod messaging;
pub mod persons;
pub mod profiles;
pub mod students;
pub mod teachers;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lookup                                      multi-role person search
///
/// /persons                                     list, create
/// /persons/{id}                                get, update
/// /persons/{id}/contacts                       list, add
/// /persons/{id}/guardians                      list
/// /persons/{id}/siblings -> /families/siblings/{id}
/// /persons/contacts/{id}/primary               promote (POST)
/// /persons/contacts/{id}                       deactivate (DELETE)
/// /persons/guardians                           link (POST)
/// /persons/guardians/{id}                      unlink (DELETE)
///
/// /teachers                                    list, create
/// /teachers/{id}                               deactivate (DELETE)
///
/// /students                                    register (POST)
///
/// /profiles                                    list (filterable)
/// /profiles/{id}                               get, update, delete (Dugsi)
/// /profiles/{id}/withdraw                      withdraw (Mahad, POST)
/// /profiles/duplicates/resolve                 soft merge (POST)
///
/// /enrollments                                 create
/// /enrollments/{id}                            get
/// /enrollments/{id}/transition                 status transition (POST)
/// /enrollments/{id}/batch                      assign batch (PUT)
/// /enrollments/transfer                        bulk batch transfer (POST)
///
/// /batches                                     list, create
/// /batches/{id}                                get, update, delete
///
/// /families                                    list households
/// /families/pricing                            tier quote (GET)
/// /families/detect-siblings                    run detection (POST)
/// /families/siblings                           manual pair (POST)
/// /families/siblings/{person_id}               list for person (GET)
/// /families/siblings/{a}/{b}                   soft remove (DELETE)
///
/// /billing/link                                link subscription (POST)
/// /billing/profiles/{profile_id}               profile billing (GET)
/// /billing/families/{family_reference_id}      family billing (GET)
///
/// /webhooks/stripe/{program}                   Stripe events (POST, signature auth)
///
/// /attendance                                  record (POST)
/// /attendance/enrollments/{id}                 history (GET)
/// /attendance/batches/{batch_id}               roll call by date (GET)
///
/// /check-ins/teachers/{teacher_id}             check in (POST)
/// /check-ins/teachers/{teacher_id}/check-out   check out (POST)
/// /check-ins/recent                            recent (GET)
///
/// /messages/whatsapp                           send one (POST)
/// /messages/whatsapp/bulk                      rate-limited bulk (POST)
/// /messages/email                              send one (POST)
/// /messages/recent                             log (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/lookup", lookup::router())
        .nest("/persons", persons::router())
        .nest("/teachers", teachers::router())
        .nest("/students", students::router())
        .nest("/profiles", profiles::router())
        .nest("/enrollments", enrollments::router())
        .nest("/batches", batches::router())
        .nest("/families", families::router())
        .nest("/billing", billing::router())
        .nest("/webhooks", webhooks::router())
        .nest("/attendance", attendance::router())
        .nest("/check-ins", check_ins::router())
        .nest("/messages", messaging::router())
}
