//! 核心模块 - 服务器配置、状态和启动
//!
//! - [`Config`] - 服务器配置
//! - [`ServerState`] - 服务器状态
//! - [`Server`] - HTTP 服务器

pub mod config;
pub mod middleware;
pub mod server;
pub mod state;

pub use config::{Config, OwnerSeed};
pub use server::Server;
pub use state::ServerState;
