//! Owner API 模块 - 管理员账号管理
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/owner/users | POST | 创建 ADMIN / TEACHER |
//! | /api/owner/admins | GET | 管理员列表 |
//! | /api/owner/admins/:id | PATCH | 启用/停用 (至少保留一个启用的管理员) |
//! | /api/owner/admins/:id/toggle | PATCH | 同上 |
//! | /api/owner/admins/:id | DELETE | 永久删除 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/owner", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/users", post(handler::create_user))
        .route("/admins", get(handler::list_admins))
        .route(
            "/admins/{id}",
            patch(handler::toggle_admin).delete(handler::delete_admin),
        )
        .route("/admins/{id}/toggle", patch(handler::toggle_admin))
        .layer(middleware::from_fn(require_role(&[Role::Owner])))
}
