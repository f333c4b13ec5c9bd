//! Timetable API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Timetable router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/timetable/my", get(handler::my))
}
