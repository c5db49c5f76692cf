use sqlx::{FromRow, PgPool};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::stock::engine::TxnType;

/// Ledger row with the product name already resolved: live product first,
/// write-time snapshot second, "Unknown Product" when both are gone.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub product_name: String,
    pub txn_type: TxnType,
    pub quantity: i64,
    pub recorded_at: PrimitiveDateTime,
    pub acting_user: String,
}

pub async fn list_recent(db: &PgPool, limit: i64) -> sqlx::Result<Vec<LedgerEntry>> {
    sqlx::query_as::<_, LedgerEntry>(
        r#"
        SELECT t.id,
               COALESCE(p.name, NULLIF(t.product_name, ''), 'Unknown Product') AS product_name,
               t.txn_type,
               t.quantity,
               t.recorded_at,
               t.acting_user
        FROM stock_transactions t
        LEFT JOIN products p ON p.id = t.product_id
        ORDER BY t.recorded_at DESC, t.id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn count_since(db: &PgPool, since: PrimitiveDateTime) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM stock_transactions WHERE recorded_at >= $1",
    )
    .bind(since)
    .fetch_one(db)
    .await
}
