//! Shared test harness: in-memory state plus oneshot request helpers

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use attend_server::api;
use attend_server::auth::{JwtConfig, JwtService};
use attend_server::core::{Config, ServerState};
use attend_server::db::DbService;
use attend_server::schedule::ScheduleService;

pub fn test_config() -> Config {
    Config {
        work_dir: "/tmp/attend-server-test".to_string(),
        http_port: 0,
        environment: "development".to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        // No files there, so the built-in term defaults are used
        schedule_dir: PathBuf::from("/tmp/attend-server-test/no-such-config"),
        jwt: JwtConfig {
            secret: "integration-test-secret-with-32-chars!!".to_string(),
            expiration_days: 7,
            issuer: "attend-server".to_string(),
            audience: "attendance-portal".to_string(),
        },
        auth_fixed_delay_ms: 0,
    }
}

/// Fresh application with an in-memory database
pub async fn test_app() -> Router {
    let config = test_config();
    let db = DbService::memory().await.expect("in-memory db");
    let schedule = ScheduleService::load(&config.schedule_dir).expect("schedule defaults");
    let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

    let state = ServerState::new(config, db, jwt_service, Arc::new(schedule));
    api::build_app(state)
}

/// Send one request and return (status, parsed JSON body)
pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, json)
}

/// Register a fresh account and return its bearer token
pub async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/user/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "super-secret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().expect("token").to_string()
}
