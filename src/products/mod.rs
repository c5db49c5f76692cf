mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products", post(handlers::create_product))
        .route("/api/products/:id", delete(handlers::delete_product))
}
