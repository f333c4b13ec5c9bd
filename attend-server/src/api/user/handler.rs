//! User API Handlers
//!
//! 注册/登录沿用门户 SPA 的校验顺序和响应契约:
//! 缺字段 400 → 邮箱已存在 409 → 邮箱格式 400 → 密码长度 400。

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateGroupRequest,
    UpdateGroupResponse,
};
use shared::models::Group;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, validate_email, validate_password, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Register a new student account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::validation("All fields are required"));
    }

    let repo = UserRepository::new(state.get_db());

    // Duplicate check runs before format checks, matching the portal contract
    if repo.find_by_email(payload.email.trim()).await?.is_some() {
        return Err(AppError::conflict("User already exists"));
    }

    validate_required_text(&payload.name, "Name", MAX_NAME_LEN)?;
    validate_email(payload.email.trim())?;
    validate_password(&payload.password)?;

    let user = repo
        .create(UserCreate {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password: payload.password,
        })
        .await?;

    let info = user.to_info();
    let token = state
        .jwt_service()
        .generate_token(&info.id, &info.name, &info.email)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    security_log!("INFO", "user_registered", email = info.email.clone());

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: info,
        }),
    ))
}

/// Log in with email and password.
///
/// 未知邮箱与密码错误返回同一 401 消息，防止用户枚举;
/// 固定延迟拉平两条路径的响应时间。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    tokio::time::sleep(Duration::from_millis(state.config.auth_fixed_delay_ms)).await;

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let repo = UserRepository::new(state.get_db());
    let user = match repo.find_by_email(payload.email.trim()).await? {
        Some(user) => user,
        None => {
            security_log!("WARN", "login_unknown_email", email = payload.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let verified = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        security_log!("WARN", "login_wrong_password", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let info = user.to_info();
    let token = state
        .jwt_service()
        .generate_token(&info.id, &info.name, &info.email)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    security_log!("INFO", "login_success", email = info.email.clone());

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: info,
    }))
}

/// Current user's profile
pub async fn profile(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.to_info(),
    }))
}

/// Set the user's cohort group (A/B/C)
pub async fn update_group(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<UpdateGroupRequest>,
) -> AppResult<Json<UpdateGroupResponse>> {
    let group: Group = payload
        .group
        .parse()
        .map_err(|_| AppError::validation("Group must be A, B, or C"))?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.update_group(&current.id, group).await?;

    Ok(Json(UpdateGroupResponse {
        success: true,
        message: format!("Group updated to {}", group),
        user: user.to_info(),
    }))
}
