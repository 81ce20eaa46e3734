//! Batch entity model and DTOs.

use maktab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full batch row from the `batches` table. Mahad-only cohort grouping.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Batch {
    pub id: DbId,
    pub name: String,
    pub program: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a batch.
#[derive(Debug, Deserialize)]
pub struct CreateBatch {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a batch. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateBatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Batch row with its open-enrollment count for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BatchWithCount {
    pub id: DbId,
    pub name: String,
    pub program: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub open_enrollments: i64,
}
