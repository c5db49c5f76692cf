use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::products::dto::{CreateProductRequest, ProductResponse};
use crate::products::repo::Product;
use crate::state::AppState;

#[instrument(skip(state, _user))]
pub async fn list_products(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = Product::list_all(&state.db).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, admin, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("Product name required".into()));
    }
    if payload.quantity < 0 {
        return Err(ApiError::InvalidInput("Quantity cannot be negative".into()));
    }
    if payload.low_stock < 0 {
        return Err(ApiError::InvalidInput(
            "Low stock threshold cannot be negative".into(),
        ));
    }
    if payload.cost_price < 0.0 || !payload.cost_price.is_finite() {
        return Err(ApiError::InvalidInput("Cost price must be non-negative".into()));
    }

    let product = Product::create(
        &state.db,
        payload.name.trim(),
        &payload.category,
        &payload.supplier,
        payload.quantity,
        payload.low_stock,
        payload.cost_price,
    )
    .await?;

    info!(product_id = %product.id, name = %product.name, by = %admin.email, "product added");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "id": product.id })),
    ))
}

#[instrument(skip(state, admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !Product::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Product not found".into()));
    }
    info!(product_id = %id, by = %admin.email, "product deleted");
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
