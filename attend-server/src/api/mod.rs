//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`user`] - 注册/登录/个人资料接口
//! - [`attendance`] - 考勤标记、查询、删除与统计接口
//! - [`timetable`] - 个性化课表接口

pub mod attendance;
pub mod health;
pub mod timetable;
pub mod user;

use axum::{Router, middleware};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// CORS 层 - 凭证模式下不允许通配来源，必须逐一列出
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::<ServerState>::new()
        .merge(user::router())
        .merge(attendance::router())
        .merge(timetable::router())
        .merge(health::router())
        // JWT 认证中间件 - 在 Router 级别应用，require_auth 内部会跳过公共路由
        // 使用 from_fn_with_state 以便中间件可以访问 ServerState
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(cors)
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}
