use std::path::PathBuf;

use anyhow::Context;
use shared::ReservationWindow;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 日志格式 |
/// | JWT_SECRET | (开发环境自动生成) | JWT 密钥, 至少 32 字符 |
/// | JWT_EXPIRATION_MINUTES | 30 | 令牌有效期 |
/// | JWT_ISSUER | parking-server | 令牌签发者 |
/// | JWT_AUDIENCE | parking-clients | 令牌受众 |
/// | AUTH_DELAY_MS | 300 | 登录固定延迟 (毫秒) |
/// | RESERVATION_OPENS | 08:45 | 预约开放时间 |
/// | RESERVATION_CLOSES | 16:30 | 预约截止时间 |
/// | OWNER_EMAIL / OWNER_PASSWORD / OWNER_NAME | - | 首次启动时创建 OWNER 账号 |
/// | CORS_ORIGINS | (空, 允许任意来源) | 逗号分隔的允许来源 |
/// | MAX_BODY_BYTES | 10240 | 请求体上限 (字节) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/parking HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 登录接口固定延迟 (毫秒), 抹平成功与失败的耗时差
    pub auth_delay_ms: u64,
    /// 每日预约窗口
    pub reservation_window: ReservationWindow,
    /// 初始 OWNER 账号
    pub owner: Option<OwnerSeed>,
    /// 允许的跨域来源, 空表示任意
    pub cors_origins: Vec<String>,
    /// 请求体上限
    pub max_body_bytes: usize,
}

/// 首次启动时写入的 OWNER 账号
#[derive(Debug, Clone)]
pub struct OwnerSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub const DEFAULT_AUTH_DELAY_MS: u64 = 300;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024;

impl Config {
    /// 默认配置, 不读环境变量
    pub fn new(work_dir: impl Into<String>, jwt: JwtConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 5000,
            environment: "development".into(),
            jwt,
            auth_delay_ms: DEFAULT_AUTH_DELAY_MS,
            reservation_window: ReservationWindow::default(),
            owner: None,
            cors_origins: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// 从环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig::from_env().context("Invalid JWT configuration")?;
        let mut config = Self::new(
            std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            jwt,
        );

        if let Some(port) = env_parse("HTTP_PORT") {
            config.http_port = port;
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Some(delay) = env_parse("AUTH_DELAY_MS") {
            config.auth_delay_ms = delay;
        }
        if let Some(limit) = env_parse("MAX_BODY_BYTES") {
            config.max_body_bytes = limit;
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins);
        }

        let opens = std::env::var("RESERVATION_OPENS").unwrap_or_else(|_| "08:45".into());
        let closes = std::env::var("RESERVATION_CLOSES").unwrap_or_else(|_| "16:30".into());
        config.reservation_window =
            ReservationWindow::parse(&opens, &closes).context("Invalid reservation window")?;

        config.owner = match (
            std::env::var("OWNER_EMAIL"),
            std::env::var("OWNER_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(OwnerSeed {
                name: std::env::var("OWNER_NAME").unwrap_or_else(|_| "Owner".into()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(config)
    }

    /// 使用自定义值覆盖部分配置
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> anyhow::Result<Self> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        Ok(config)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        self.work_dir().join("database")
    }

    /// work_dir/logs
    pub fn log_dir(&self) -> PathBuf {
        self.work_dir().join("logs")
    }

    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// "a, b,,c" -> ["a", "b", "c"]
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
