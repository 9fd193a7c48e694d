use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shared::ReservationWindow;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::AuthService;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求 clone 一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | admin_lock | Arc<Mutex<()>> | 管理员启停/删除串行化 |
/// | signup_lock | Arc<Mutex<()>> | 账号创建串行化 (学工号分配) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// "至少保留一个启用的管理员" 检查与写入必须在同一临界区内
    pub admin_lock: Arc<Mutex<()>>,
    /// 学工号 "计数 + 1" 分配与插入必须在同一临界区内
    pub signup_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// 用已打开的数据库构造状态
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            admin_lock: Arc::new(Mutex::new(())),
            signup_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/parking.db)
    /// 3. OWNER 账号 (如已配置)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("parking.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let state = Self::new(config.clone(), db_service.db);

        if let Some(owner) = &config.owner {
            let created = AuthService::new(&state).ensure_owner(owner).await?;
            if created {
                tracing::info!(email = %owner.email, "Owner account created");
            }
        }

        Ok(state)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        self.config.work_dir()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn reservation_window(&self) -> ReservationWindow {
        self.config.reservation_window
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.config.auth_delay_ms)
    }
}
