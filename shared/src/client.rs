//! API request/response types shared between server and client
//!
//! All wire names are camelCase to match the portal's SPA contract. Batch
//! mark records are deliberately loosely typed (`Option<String>` fields) so
//! a malformed record surfaces as a per-item error instead of rejecting the
//! whole request body at deserialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Group, SubjectStat};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User information returned by auth and profile endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub group: Option<Group>,
}

/// Register/login response: token plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

/// Profile fetch response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// Group update request; the group is validated server-side so an invalid
/// value yields a 400 rather than a deserialization error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    pub group: String,
}

/// Group update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupResponse {
    pub success: bool,
    pub message: String,
    pub user: UserInfo,
}

// =============================================================================
// Attendance API DTOs
// =============================================================================

/// One record in a batch mark request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordInput {
    #[serde(default)]
    pub class_date: Option<String>,
    #[serde(default)]
    pub time_slot_key: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Batch mark request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub records: Vec<AttendanceRecordInput>,
}

/// Per-record failure in a batch mark response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordError {
    pub record: AttendanceRecordInput,
    pub error: String,
}

/// Batch mark response with per-item breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    pub success: bool,
    pub message: String,
    pub saved_count: usize,
    pub error_count: usize,
    pub errors: Vec<RecordError>,
}

/// Persisted attendance record as returned over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordView {
    pub class_date: String,
    pub time_slot_key: String,
    pub time_slot: String,
    pub subject: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attendance list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyAttendanceResponse {
    pub success: bool,
    pub count: usize,
    pub records: Vec<AttendanceRecordView>,
}

/// Delete request addressing a single (date, slot) record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAttendanceRequest {
    pub class_date: String,
    pub time_slot_key: String,
}

/// Generic success/message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Per-subject statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatsResponse {
    pub success: bool,
    pub stats: Vec<SubjectStat>,
    pub total_records: usize,
    pub processed_subjects: usize,
}

// =============================================================================
// Timetable API DTOs
// =============================================================================

/// One markable class session, resolved for the caller's group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub date: String,
    pub day: String,
    pub time_slot: String,
    pub time_slot_key: String,
    pub subject: String,
    pub topic: String,
}

/// Personalized flat timetable response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub success: bool,
    pub group: Group,
    pub entries: Vec<TimetableEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_stats_serialize_camel_case() {
        let response = SubjectStatsResponse {
            success: true,
            stats: vec![SubjectStat {
                subject: "Pathology".to_string(),
                total_classes: 4,
                attended_classes: 2,
                cancelled_classes: 1,
            }],
            total_records: 4,
            processed_subjects: 1,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalRecords"], 4);
        assert_eq!(json["processedSubjects"], 1);
        assert_eq!(json["stats"][0]["totalClasses"], 4);
        assert_eq!(json["stats"][0]["attendedClasses"], 2);
        assert_eq!(json["stats"][0]["cancelledClasses"], 1);
    }

    #[test]
    fn record_input_accepts_partial_payloads() {
        let input: AttendanceRecordInput =
            serde_json::from_str(r#"{"classDate": "03-11-2025", "timeSlotKey": "time_8_9_AM"}"#)
                .unwrap();
        assert_eq!(input.class_date.as_deref(), Some("03-11-2025"));
        assert_eq!(input.time_slot_key.as_deref(), Some("time_8_9_AM"));
        assert!(input.status.is_none());
        assert!(input.subject.is_none());
    }

    #[test]
    fn record_view_serializes_camel_case() {
        let view = AttendanceRecordView {
            class_date: "03-11-2025".to_string(),
            time_slot_key: "time_8_9_AM".to_string(),
            time_slot: "8-9 AM".to_string(),
            subject: "Pathology".to_string(),
            status: "Present".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["classDate"], "03-11-2025");
        assert_eq!(json["timeSlotKey"], "time_8_9_AM");
        assert_eq!(json["timeSlot"], "8-9 AM");
        assert!(json.get("createdAt").is_some());
    }
}
