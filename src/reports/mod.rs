mod dto;
pub mod handlers;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/low-stock", get(handlers::low_stock))
        .route("/inventory-value", get(handlers::inventory_value))
        .route("/api/stats", get(handlers::stats))
        .route("/api/chart/stock-quantity", get(handlers::stock_quantity_chart))
        .route("/api/chart/inventory-value", get(handlers::inventory_value_chart))
        .route("/export/inventory-csv", get(handlers::export_inventory_csv))
}
