//! Attendance Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::{AttendanceRecordInput, AttendanceRecordView};
use shared::models::AttendanceStatus;

use super::UserId;
use super::serde_helpers;

/// Attendance record matching the SurrealDB `attendance` table
///
/// At most one record exists per (user, class_date, time_slot_key); the
/// repository addresses a deterministic record key derived from that tuple
/// and the table carries a unique composite index as a second line of
/// defense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<surrealdb::RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub class_date: String,
    pub time_slot_key: String,
    pub time_slot: String,
    pub subject: String,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// Wire-format view (drops the internal ids)
    pub fn to_view(&self) -> AttendanceRecordView {
        AttendanceRecordView {
            class_date: self.class_date.clone(),
            time_slot_key: self.time_slot_key.clone(),
            time_slot: self.time_slot.clone(),
            subject: self.subject.clone(),
            status: self.status.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated attendance write, ready for the repository
///
/// Built from a loosely-typed batch item; this is where per-record
/// validation happens so one bad item cannot sink its batch.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub class_date: String,
    pub time_slot_key: String,
    pub time_slot: String,
    pub subject: String,
    pub status: AttendanceStatus,
}

impl TryFrom<&AttendanceRecordInput> for NewAttendance {
    type Error = String;

    fn try_from(input: &AttendanceRecordInput) -> Result<Self, Self::Error> {
        let class_date = match input.class_date.as_deref() {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => return Err("Missing required field: classDate".to_string()),
        };
        let time_slot_key = match input.time_slot_key.as_deref() {
            Some(k) if !k.trim().is_empty() => k.to_string(),
            _ => return Err("Missing required field: timeSlotKey".to_string()),
        };
        let status = match input.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s
                .parse::<AttendanceStatus>()
                .map_err(|e| e.to_string())?,
            _ => return Err("Missing required field: status".to_string()),
        };

        Ok(Self {
            class_date,
            time_slot_key,
            status,
            // Optional descriptive fields fall back like the original portal
            subject: input
                .subject
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unknown Subject".to_string()),
            time_slot: input
                .time_slot
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unknown Time".to_string()),
        })
    }
}
