mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", get(handlers::logout))
}
