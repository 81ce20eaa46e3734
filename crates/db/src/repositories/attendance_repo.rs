//! Repository for the `attendance_records` table.

use chrono::NaiveDate;
use maktab_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{AttendanceRecord, RecordAttendance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, enrollment_id, date, status, note, recorded_by, created_at, updated_at";

/// Provides operations for attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Record attendance for one enrollment on one day. Re-recording the
    /// same day overwrites the earlier row.
    pub async fn upsert(
        pool: &PgPool,
        input: &RecordAttendance,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records (enrollment_id, date, status, note, recorded_by)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_attendance_day
             DO UPDATE SET status = EXCLUDED.status,
                           note = EXCLUDED.note,
                           recorded_by = EXCLUDED.recorded_by,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(input.enrollment_id)
            .bind(input.date)
            .bind(&input.status)
            .bind(&input.note)
            .bind(input.recorded_by)
            .fetch_one(pool)
            .await
    }

    /// List an enrollment's attendance, newest first.
    pub async fn list_for_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE enrollment_id = $1
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(enrollment_id)
            .fetch_all(pool)
            .await
    }

    /// Attendance for every enrollment in a batch on one day.
    pub async fn list_for_batch_date(
        pool: &PgPool,
        batch_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            "SELECT a.id, a.enrollment_id, a.date, a.status, a.note, a.recorded_by,
                    a.created_at, a.updated_at
             FROM attendance_records a
             JOIN enrollments e ON e.id = a.enrollment_id
             WHERE e.batch_id = $1 AND a.date = $2
             ORDER BY a.id",
        )
        .bind(batch_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
