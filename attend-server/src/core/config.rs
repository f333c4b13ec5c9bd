use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 考勤门户后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/attend | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | ALLOWED_ORIGINS | http://localhost:5173 | CORS 允许的来源 (逗号分隔) |
/// | SCHEDULE_DIR | {WORK_DIR}/config | 课表/轮转表配置目录 |
/// | JWT_SECRET | (开发环境自动生成) | JWT 签名密钥 |
/// | JWT_EXPIRATION_DAYS | 7 | 令牌有效期 (天) |
/// | AUTH_FIXED_DELAY_MS | 500 | 登录固定延迟 (毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/attend HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// CORS 允许的来源列表
    pub allowed_origins: Vec<String>,
    /// 课表与轮转表配置目录
    pub schedule_dir: PathBuf,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 登录请求固定延迟 (毫秒)，缓解时序侧信道
    pub auth_fixed_delay_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/attend".into());
        let schedule_dir = std::env::var("SCHEDULE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(&work_dir).join("config"));

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| vec!["http://localhost:5173".into()]),
            schedule_dir,
            jwt: JwtConfig::default(),
            auth_fixed_delay_ms: std::env::var("AUTH_FIXED_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            work_dir,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.schedule_dir = PathBuf::from(&config.work_dir).join("config");
        config
    }

    /// 数据库存储目录
    pub fn db_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("db")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_rebase_derived_dirs() {
        let config = Config::with_overrides("/tmp/attend-test", 0);
        assert_eq!(config.db_dir(), PathBuf::from("/tmp/attend-test/db"));
        assert_eq!(
            config.schedule_dir,
            PathBuf::from("/tmp/attend-test/config")
        );
    }
}
