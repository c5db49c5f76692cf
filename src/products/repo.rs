use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub supplier: String,
    pub quantity: i64,
    pub low_stock: i64,
    pub cost_price: f64,
    pub created_at: OffsetDateTime,
}

impl Product {
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, supplier, quantity, low_stock, cost_price, created_at
            FROM products
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        category: &str,
        supplier: &str,
        quantity: i64,
        low_stock: i64,
        cost_price: f64,
    ) -> sqlx::Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, supplier, quantity, low_stock, cost_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, category, supplier, quantity, low_stock, cost_price, created_at
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(supplier)
        .bind(quantity)
        .bind(low_stock)
        .bind(cost_price)
        .fetch_one(db)
        .await
    }

    /// Returns false when no such product existed. Ledger rows keep their
    /// name snapshot; the FK goes NULL.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
