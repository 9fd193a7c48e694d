//! Parking Server - 校园停车管理系统后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (用户、区域、车位)
//! - **认证** (`auth`): JWT + Argon2 认证体系, 角色中间件
//! - **服务** (`services`): 管理员管理、区域/车位生命周期、登录与密码重置
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! parking-server/src/
//! ├── core/          # 配置、状态、服务器、中间件
//! ├── auth/          # JWT 认证、角色检查
//! ├── services/      # 业务逻辑
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验、时间
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 认证/授权事件统一写入 "security" target
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

/// 进程启动前的环境准备
///
/// 1. 加载 `.env`
/// 2. 初始化日志 (LOG_LEVEL, LOG_JSON, WORK_DIR/logs)
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 可选
    let _ = dotenv::dotenv();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_JSON")
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    let log_dir = std::path::Path::new(&work_dir).join("logs");

    init_logger_with_file(&level, json, Some(&log_dir))
}

pub fn print_banner() {
    println!(
        r#"
    ____             __   _
   / __ \____ ______/ /__(_)___  ____ _
  / /_/ / __ `/ ___/ //_/ / __ \/ __ `/
 / ____/ /_/ / /  / ,< / / / / / /_/ /
/_/    \__,_/_/  /_/|_/_/_/ /_/\__, /
                              /____/
    "#
    );
}
