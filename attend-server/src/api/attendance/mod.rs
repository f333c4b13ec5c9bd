//! Attendance API Module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Attendance router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/mark", post(handler::mark))
        .route("/my", get(handler::my))
        .route("/remove", delete(handler::remove))
        .route("/stats/subject", get(handler::subject_stats))
}
