//! Attendance marking, listing, removal and statistics flows

mod common;

use http::StatusCode;
use serde_json::{Value, json};

use common::{register, send, test_app};

fn record(date: &str, slot_key: &str, subject: &str, status: &str) -> Value {
    json!({
        "classDate": date,
        "timeSlotKey": slot_key,
        "timeSlot": "8-9 AM",
        "subject": subject,
        "status": status,
    })
}

#[tokio::test]
async fn mark_and_list_round_trip() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&token),
        Some(json!({"records": [
            record("03-11-2025", "time_8_9_AM", "Pathology", "Present"),
            record("03-11-2025", "time_9_AM_12_Noon", "MEDICINE CLINIC", "Absent"),
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["savedCount"], 2);
    assert_eq!(body["errorCount"], 0);

    let (status, body) = send(&app, "GET", "/api/attendance/my", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let records = body["records"].as_array().unwrap();
    assert!(records.iter().any(|r| {
        r["timeSlotKey"] == "time_8_9_AM" && r["status"] == "Present" && r["subject"] == "Pathology"
    }));
}

#[tokio::test]
async fn batch_isolates_bad_records() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&token),
        Some(json!({"records": [
            record("03-11-2025", "time_8_9_AM", "Pathology", "Present"),
            {"classDate": "03-11-2025", "timeSlotKey": "time_1_2_PM", "subject": "Pharmacology"},
            record("04-11-2025", "time_8_9_AM", "Pharmacology", "Absent"),
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["savedCount"], 2);
    assert_eq!(body["errorCount"], 1);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["error"].as_str().unwrap().contains("status"));

    // The valid records were persisted despite the failure
    let (_, body) = send(&app, "GET", "/api/attendance/my", Some(&token), None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn remarking_a_slot_keeps_one_record_with_the_latest_status() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    for status_label in ["Present", "Cancelled"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/attendance/mark",
            Some(&token),
            Some(json!({"records": [
                record("03-11-2025", "time_8_9_AM", "Pathology", status_label),
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["savedCount"], 1);
    }

    let (_, body) = send(&app, "GET", "/api/attendance/my", Some(&token), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["records"][0]["status"], "Cancelled");
}

#[tokio::test]
async fn empty_batch_is_rejected() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&token),
        Some(json!({"records": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No attendance records provided.");
}

#[tokio::test]
async fn remove_deletes_once_then_404s() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&token),
        Some(json!({"records": [
            record("03-11-2025", "time_8_9_AM", "Pathology", "Present"),
        ]})),
    )
    .await;

    let remove_body = json!({"classDate": "03-11-2025", "timeSlotKey": "time_8_9_AM"});

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/attendance/remove",
        Some(&token),
        Some(remove_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Attendance record removed successfully");

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/attendance/remove",
        Some(&token),
        Some(remove_body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Attendance record not found");
}

#[tokio::test]
async fn subject_stats_exclude_cancelled_from_the_denominator() {
    let app = test_app().await;
    let token = register(&app, "Asha Rao", "asha@college.edu").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&token),
        Some(json!({"records": [
            record("03-11-2025", "time_8_9_AM", "Pathology", "Present"),
            record("04-11-2025", "time_8_9_AM", "Pathology", "Present"),
            record("05-11-2025", "time_8_9_AM", "Pathology", "Absent"),
            record("06-11-2025", "time_8_9_AM", "Pathology", "Cancelled"),
            record("03-11-2025", "time_1_2_PM", "Pharmacology (SGL)", "Present"),
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        "/api/attendance/stats/subject",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRecords"], 5);
    assert_eq!(body["processedSubjects"], 2);

    let stats = body["stats"].as_array().unwrap();
    let pathology = stats
        .iter()
        .find(|s| s["subject"] == "Pathology")
        .expect("Pathology stats");
    assert_eq!(pathology["totalClasses"], 4);
    assert_eq!(pathology["attendedClasses"], 2);
    assert_eq!(pathology["cancelledClasses"], 1);

    // 100% subject sorts ahead of the 67% one
    assert_eq!(stats[0]["subject"], "Pharmacology (SGL)");
}

#[tokio::test]
async fn attendance_routes_require_a_token() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/api/attendance/my", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/attendance/mark",
        None,
        Some(json!({"records": [record("03-11-2025", "time_8_9_AM", "Pathology", "Present")]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_only_see_their_own_records() {
    let app = test_app().await;
    let asha = register(&app, "Asha Rao", "asha@college.edu").await;
    let ravi = register(&app, "Ravi Kumar", "ravi@college.edu").await;

    send(
        &app,
        "POST",
        "/api/attendance/mark",
        Some(&asha),
        Some(json!({"records": [
            record("03-11-2025", "time_8_9_AM", "Pathology", "Present"),
        ]})),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/attendance/my", Some(&ravi), None).await;
    assert_eq!(body["count"], 0);

    let (_, body) = send(&app, "GET", "/api/attendance/my", Some(&asha), None).await;
    assert_eq!(body["count"], 1);
}
