//! Zone API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::PARKING_MANAGERS;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/zones", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/slots", get(handler::list_slots));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/deleted", get(handler::list_deleted))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::delete))
        .route("/{id}/restore", post(handler::restore))
        .layer(middleware::from_fn(require_role(PARKING_MANAGERS)));

    read_routes.merge(manage_routes)
}
