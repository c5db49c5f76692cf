mod dto;
pub mod handlers;
mod policy;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/users", get(handlers::list_users))
        .route("/promote", post(handlers::promote))
        .route("/demote", post(handlers::demote))
        .route("/delete-user", post(handlers::delete_user))
        .route("/admin/exists", get(handlers::admin_exists))
}
