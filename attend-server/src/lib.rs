//! Attendance Portal Server - 学生考勤门户后端
//!
//! # 架构概述
//!
//! 本模块是考勤服务的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (用户、考勤记录)
//! - **课表** (`schedule`): 课表数据、轮转配置、科目解析
//! - **统计** (`stats`): 按科目聚合出勤率
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! attend-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── schedule/      # 课表与科目解析
//! ├── stats.rs       # 出勤统计聚合
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod schedule;
pub mod stats;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtConfig, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use schedule::ScheduleService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 文件可选，缺失时忽略
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___   __  __                __
   /   | / /_/ /____  ____  ____/ /
  / /| |/ __/ __/ _ \/ __ \/ __  /
 / ___ / /_/ /_/  __/ / / / /_/ /
/_/  |_\__/\__/\___/_/ /_/\__,_/
    "#
    );
}
