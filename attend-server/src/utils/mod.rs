//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`logger`] - 日志初始化
//! - [`time`] - 门户日期格式解析
//! - [`validation`] - 输入验证辅助函数

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
