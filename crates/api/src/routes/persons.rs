//! Route definitions for the `/persons` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::persons;
use crate::state::AppState;

/// Routes mounted at `/persons`.
///
/// ```text
/// GET    /                        -> list_persons
/// POST   /                        -> create_person
/// GET    /{id}                    -> get_person
/// PUT    /{id}                    -> update_person
/// GET    /{id}/contacts           -> list_contacts
/// POST   /{id}/contacts           -> add_contact
/// POST   /contacts/{id}/primary   -> set_primary_contact
/// DELETE /contacts/{id}           -> deactivate_contact
/// POST   /guardians               -> link_guardian
/// DELETE /guardians/{id}          -> unlink_guardian
/// GET    /{id}/guardians          -> list_guardians
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(persons::list_persons).post(persons::create_person))
        .route(
            "/{id}",
            get(persons::get_person).put(persons::update_person),
        )
        .route(
            "/{id}/contacts",
            get(persons::list_contacts).post(persons::add_contact),
        )
        .route(
            "/contacts/{id}/primary",
            post(persons::set_primary_contact),
        )
        .route("/contacts/{id}", delete(persons::deactivate_contact))
        .route("/guardians", post(persons::link_guardian))
        .route("/guardians/{id}", delete(persons::unlink_guardian))
        .route("/{id}/guardians", get(persons::list_guardians))
}
