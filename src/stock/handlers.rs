use axum::{extract::State, Form, Json};
use serde_json::{json, Value};
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::clock;
use crate::error::ApiError;
use crate::state::AppState;
use crate::stock::dto::{AddTransactionForm, TransactionResponse};
use crate::stock::engine::{self, TxnType};
use crate::stock::{notifier, repo};

const HISTORY_LIMIT: i64 = 100;

#[instrument(skip(state, user, form))]
pub async fn add_transaction(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<AddTransactionForm>,
) -> Result<Json<Value>, ApiError> {
    let txn_type: TxnType = form.transaction_type.parse()?;
    let recorded_at = clock::now_civil(state.config.ledger_offset);

    let applied = engine::apply_transaction(
        &state.db,
        form.product_id,
        txn_type,
        form.quantity,
        &user.email,
        recorded_at,
    )
    .await?;

    // Fire-and-forget: delivery failure never fails the movement.
    tokio::spawn(notifier::maybe_alert(
        state.clone(),
        applied.product_name.clone(),
        applied.new_quantity,
        applied.low_stock,
    ));

    Ok(Json(json!({
        "success": true,
        "newQuantity": applied.new_quantity
    })))
}

#[instrument(skip(state, _user))]
pub async fn list_transactions(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let entries = repo::list_recent(&state.db, HISTORY_LIMIT).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
