//! Timetable API Handlers

use axum::{Json, extract::State};
use shared::client::TimetableResponse;
use shared::models::Group;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Personalized timetable for the current user's group.
///
/// Users without a group yet see the group-A rotation, same as the portal.
pub async fn my(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<TimetableResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let group = user.group.unwrap_or(Group::A);
    let entries = state.schedule().personalized_timetable(group);

    Ok(Json(TimetableResponse {
        success: true,
        group,
        entries,
    }))
}
