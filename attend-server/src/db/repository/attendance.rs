//! Attendance Repository
//!
//! Writes are upserts addressed by a deterministic record key derived from
//! (user, class_date, time_slot_key), so re-marking the same slot converges
//! to the latest status instead of growing duplicates.

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Attendance, NewAttendance, UserId};

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Deterministic record key for the unique (user, date, slot) tuple
    fn record_key(user: &UserId, class_date: &str, time_slot_key: &str) -> RecordId {
        RecordId::from_table_key(
            "attendance",
            format!("{}_{}_{}", user.key(), class_date, time_slot_key),
        )
    }

    /// Insert or overwrite the record for (user, date, slot)
    ///
    /// `created_at` survives overwrites; `updated_at` always refreshes.
    pub async fn upsert(&self, user: &UserId, record: &NewAttendance) -> RepoResult<Attendance> {
        let rec_id = Self::record_key(user, &record.class_date, &record.time_slot_key);

        let mut result = self
            .base
            .db()
            .query(
                r#"UPSERT $rec SET
                    user = $user,
                    class_date = $class_date,
                    time_slot_key = $time_slot_key,
                    time_slot = $time_slot,
                    subject = $subject,
                    status = $status,
                    updated_at = $now,
                    created_at = created_at ?? $now
                RETURN AFTER"#,
            )
            .bind(("rec", rec_id))
            .bind(("user", user.clone()))
            .bind(("class_date", record.class_date.clone()))
            .bind(("time_slot_key", record.time_slot_key.clone()))
            .bind(("time_slot", record.time_slot.clone()))
            .bind(("subject", record.subject.clone()))
            .bind(("status", record.status))
            .bind(("now", Utc::now()))
            .await?;

        let saved: Option<Attendance> = result.take(0)?;
        saved.ok_or_else(|| RepoError::Database("Failed to save attendance record".to_string()))
    }

    /// All records of one user, in a stable order
    pub async fn find_by_user(&self, user: &UserId) -> RepoResult<Vec<Attendance>> {
        let records: Vec<Attendance> = self
            .base
            .db()
            .query(
                "SELECT * FROM attendance WHERE user = $user ORDER BY class_date, time_slot_key",
            )
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// Delete the single record for (user, date, slot); false when absent
    pub async fn delete(
        &self,
        user: &UserId,
        class_date: &str,
        time_slot_key: &str,
    ) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                r#"DELETE attendance
                    WHERE user = $user
                      AND class_date = $class_date
                      AND time_slot_key = $time_slot_key
                RETURN BEFORE"#,
            )
            .bind(("user", user.clone()))
            .bind(("class_date", class_date.to_string()))
            .bind(("time_slot_key", time_slot_key.to_string()))
            .await?;

        let deleted: Vec<Attendance> = result.take(0)?;
        Ok(!deleted.is_empty())
    }
}
