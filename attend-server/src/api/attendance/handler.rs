//! Attendance API Handlers

use axum::{Json, extract::State};
use shared::client::{
    MarkAttendanceRequest, MarkAttendanceResponse, MessageResponse, MyAttendanceResponse,
    RecordError, RemoveAttendanceRequest, SubjectStatsResponse,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{NewAttendance, UserId};
use crate::db::repository::AttendanceRepository;
use crate::stats::compute_subject_stats;
use crate::utils::{AppError, AppResult};

fn user_record_id(current: &CurrentUser) -> AppResult<UserId> {
    current
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed user id in token"))
}

/// Batch mark attendance.
///
/// Records are processed independently; a bad record lands in the error
/// list while the rest of the batch is persisted. The response is always
/// 200 with a per-item breakdown.
pub async fn mark(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<MarkAttendanceRequest>,
) -> AppResult<Json<MarkAttendanceResponse>> {
    if payload.records.is_empty() {
        return Err(AppError::validation("No attendance records provided."));
    }

    let user = user_record_id(&current)?;
    let repo = AttendanceRepository::new(state.get_db());

    let mut saved_count = 0;
    let mut errors = Vec::new();

    for input in &payload.records {
        let record = match NewAttendance::try_from(input) {
            Ok(record) => record,
            Err(reason) => {
                errors.push(RecordError {
                    record: input.clone(),
                    error: reason,
                });
                continue;
            }
        };

        match repo.upsert(&user, &record).await {
            Ok(_) => saved_count += 1,
            Err(e) => {
                tracing::error!(
                    "Failed to save attendance for {} {}: {}",
                    record.class_date,
                    record.time_slot_key,
                    e
                );
                errors.push(RecordError {
                    record: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        user = %current.email,
        saved = saved_count,
        failed = errors.len(),
        "Attendance batch processed"
    );

    Ok(Json(MarkAttendanceResponse {
        success: true,
        message: "Attendance processing completed".to_string(),
        saved_count,
        error_count: errors.len(),
        errors,
    }))
}

/// All attendance records of the current user
pub async fn my(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<MyAttendanceResponse>> {
    let user = user_record_id(&current)?;
    let repo = AttendanceRepository::new(state.get_db());
    let records = repo.find_by_user(&user).await?;

    Ok(Json(MyAttendanceResponse {
        success: true,
        count: records.len(),
        records: records.iter().map(|r| r.to_view()).collect(),
    }))
}

/// Remove one attendance record addressed by (date, slot)
pub async fn remove(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<RemoveAttendanceRequest>,
) -> AppResult<Json<MessageResponse>> {
    if payload.class_date.trim().is_empty() || payload.time_slot_key.trim().is_empty() {
        return Err(AppError::validation(
            "classDate and timeSlotKey are required",
        ));
    }

    let user = user_record_id(&current)?;
    let repo = AttendanceRepository::new(state.get_db());
    let deleted = repo
        .delete(&user, &payload.class_date, &payload.time_slot_key)
        .await?;

    if !deleted {
        return Err(AppError::not_found("Attendance record not found"));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Attendance record removed successfully".to_string(),
    }))
}

/// Per-subject attendance statistics for the current user
pub async fn subject_stats(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<SubjectStatsResponse>> {
    let user = user_record_id(&current)?;
    let repo = AttendanceRepository::new(state.get_db());
    let records = repo.find_by_user(&user).await?;

    let stats = compute_subject_stats(&records);

    Ok(Json(SubjectStatsResponse {
        success: true,
        total_records: records.len(),
        processed_subjects: stats.len(),
        stats,
    }))
}
