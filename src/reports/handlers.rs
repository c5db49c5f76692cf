use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::auth::extractors::{AdminUser, CurrentUser};
use crate::clock;
use crate::error::ApiError;
use crate::products::repo::Product;
use crate::reports::dto::{
    inventory_csv, LowStockItem, LowStockResponse, QuantityPoint, StatsResponse, ValuePoint,
};
use crate::state::AppState;
use crate::stock::repo;

/// Products at or below their configured threshold. A threshold of 0 means
/// "no threshold", so those products never appear regardless of quantity.
#[instrument(skip(state))]
pub async fn low_stock(State(state): State<AppState>) -> Result<Json<LowStockResponse>, ApiError> {
    let items: Vec<LowStockItem> = sqlx::query_as::<_, (String, i64, i64)>(
        r#"
        SELECT name, quantity, low_stock
        FROM products
        WHERE low_stock > 0 AND quantity <= low_stock
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(name, quantity, low_stock)| LowStockItem {
        name,
        quantity,
        low_stock,
    })
    .collect();

    Ok(Json(LowStockResponse {
        count: items.len(),
        items,
    }))
}

#[instrument(skip(state))]
pub async fn inventory_value(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total = total_inventory_value(&state).await?;
    Ok(Json(json!({ "inventoryValue": total })))
}

#[instrument(skip(state, _user))]
pub async fn stats(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&state.db)
        .await?;
    let low_stock = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM products WHERE low_stock > 0 AND quantity <= low_stock",
    )
    .fetch_one(&state.db)
    .await?;
    let inventory_value = total_inventory_value(&state).await?;
    let midnight = clock::local_midnight(state.config.ledger_offset);
    let transactions_today = repo::count_since(&state.db, midnight).await?;

    Ok(Json(StatsResponse {
        products,
        low_stock,
        inventory_value,
        transactions_today,
    }))
}

#[instrument(skip(state, _user))]
pub async fn stock_quantity_chart(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<QuantityPoint>>, ApiError> {
    let points = sqlx::query_as::<_, (String, i64)>(
        "SELECT name, quantity FROM products ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(name, quantity)| QuantityPoint { name, quantity })
    .collect();
    Ok(Json(points))
}

#[instrument(skip(state, _user))]
pub async fn inventory_value_chart(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ValuePoint>>, ApiError> {
    let points = sqlx::query_as::<_, (String, f64)>(
        "SELECT name, quantity::double precision * cost_price FROM products ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(name, value)| ValuePoint { name, value })
    .collect();
    Ok(Json(points))
}

#[instrument(skip(state, _admin))]
pub async fn export_inventory_csv(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let products = Product::list_all(&state.db).await?;
    let bytes = inventory_csv(&products)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventory_report.csv\"",
            ),
        ],
        bytes,
    ))
}

async fn total_inventory_value(state: &AppState) -> Result<f64, ApiError> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(quantity::double precision * cost_price), 0) FROM products",
    )
    .fetch_one(&state.db)
    .await?;
    Ok(total)
}
