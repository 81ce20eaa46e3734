use crate::types::DbId;

/// Domain-level error shared by every crate in the workspace.
///
/// The API layer maps these onto HTTP statuses; nothing below the API layer
/// knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule; safe to show to the caller.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with current state (already exists, still in
    /// use, already done).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected condition; logged in full, shown to callers sanitized.
    #[error("Internal error: {0}")]
    Internal(String),
}
