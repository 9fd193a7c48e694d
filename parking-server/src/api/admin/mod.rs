//! User directory

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};
use shared::models::Role;

use super::PARKING_MANAGERS;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let list_routes = Router::new()
        .route("/api/admin/users", get(handler::list_users))
        .layer(middleware::from_fn(require_role(PARKING_MANAGERS)));

    let status_routes = Router::new()
        .route("/api/admin/users/{id}/status", patch(handler::set_status))
        .layer(middleware::from_fn(require_role(&[Role::Owner])));

    list_routes.merge(status_routes)
}
