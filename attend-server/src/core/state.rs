use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::schedule::ScheduleService;
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是考勤门户后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | schedule | Arc<ScheduleService> | 课表与轮转表 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 课表与轮转配置 (启动时加载，只读)
    pub schedule: Arc<ScheduleService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize()`] 代替；测试组装内存数据库时使用
    pub fn new(
        config: Config,
        db: DbService,
        jwt_service: Arc<JwtService>,
        schedule: Arc<ScheduleService>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            schedule,
        }
    }

    /// 初始化所有服务并构建状态
    ///
    /// 创建工作目录、打开数据库、加载课表配置、准备 JWT 服务
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(config.db_dir()).map_err(|e| {
            crate::utils::AppError::internal(format!("Failed to create work dir: {}", e))
        })?;

        let db_path = config.db_dir().to_string_lossy().to_string();
        let db = DbService::new(&db_path).await?;

        let schedule = ScheduleService::load(&config.schedule_dir)?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(
            config.clone(),
            db,
            jwt_service,
            Arc::new(schedule),
        ))
    }

    /// 获取数据库句柄
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.db.clone()
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// 获取课表服务
    pub fn schedule(&self) -> &ScheduleService {
        &self.schedule
    }
}
