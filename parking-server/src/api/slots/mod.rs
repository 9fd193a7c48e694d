//! Slot API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::PARKING_MANAGERS;
use crate::auth::require_role;
use crate::core::ServerState;
use crate::services::slot::RESERVER_ROLES;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/slots", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", axum::routing::put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(PARKING_MANAGERS)));

    let reserve_routes = Router::new()
        .route("/{id}/reserve", post(handler::reserve))
        .layer(middleware::from_fn(require_role(RESERVER_ROLES)));

    read_routes.merge(manage_routes).merge(reserve_routes)
}
