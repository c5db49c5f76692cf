mod dto;
pub mod engine;
pub mod handlers;
pub mod notifier;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add_transaction", post(handlers::add_transaction))
        .route("/api/transactions", get(handlers::list_transactions))
}
