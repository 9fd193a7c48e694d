//! 服务层 - 业务逻辑
//!
//! # 服务列表
//!
//! - [`AuthService`] - 登录、注册、OTP 密码重置
//! - [`AdminService`] - 管理员账号管理 (至少保留一个启用的管理员)
//! - [`ZoneService`] - 停车区域 (软删除/恢复)
//! - [`SlotService`] - 车位 (状态更新、预约窗口)

pub mod admin;
pub mod auth;
pub mod slot;
pub mod zone;

pub use admin::AdminService;
pub use auth::AuthService;
pub use slot::SlotService;
pub use zone::ZoneService;
