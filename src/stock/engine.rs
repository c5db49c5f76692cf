//! Stock mutation engine: the one read-validate-write path that changes a
//! product's quantity. The quantity change is an atomic conditional UPDATE,
//! so two concurrent movements against the same product serialize in the
//! database instead of racing in the handler.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::PrimitiveDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "txn_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TxnType {
    In,
    Out,
}

impl std::str::FromStr for TxnType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(TxnType::In),
            "OUT" => Ok(TxnType::Out),
            other => Err(ApiError::InvalidInput(format!(
                "Unknown transaction type: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TxnType::In => "IN",
            TxnType::Out => "OUT",
        })
    }
}

/// Outcome of a successful stock movement, carried to the notifier.
#[derive(Debug)]
pub struct Applied {
    pub product_name: String,
    pub new_quantity: i64,
    pub low_stock: i64,
}

/// Applies one stock movement: mutate quantity, append the ledger row, all in
/// one database transaction. OUT movements that exceed the available quantity
/// fail with `InsufficientStock` and mutate nothing.
pub async fn apply_transaction(
    db: &PgPool,
    product_id: Uuid,
    txn_type: TxnType,
    quantity: i64,
    acting_user: &str,
    recorded_at: PrimitiveDateTime,
) -> Result<Applied, ApiError> {
    ensure_positive_quantity(quantity)?;

    let mut tx = db.begin().await?;

    let updated: Option<(String, i64, i64)> = match txn_type {
        TxnType::In => {
            sqlx::query_as(
                r#"
                UPDATE products SET quantity = quantity + $2
                WHERE id = $1
                RETURNING name, quantity, low_stock
                "#,
            )
            .bind(product_id)
            .bind(quantity)
            .fetch_optional(&mut *tx)
            .await?
        }
        TxnType::Out => {
            // The WHERE clause is the sufficiency check; a concurrent writer
            // cannot slip between read and write.
            sqlx::query_as(
                r#"
                UPDATE products SET quantity = quantity - $2
                WHERE id = $1 AND quantity >= $2
                RETURNING name, quantity, low_stock
                "#,
            )
            .bind(product_id)
            .bind(quantity)
            .fetch_optional(&mut *tx)
            .await?
        }
    };

    let (product_name, new_quantity, low_stock) = match updated {
        Some(row) => row,
        None => {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(missed_update_error(available, quantity));
        }
    };

    sqlx::query(
        r#"
        INSERT INTO stock_transactions
            (product_id, product_name, txn_type, quantity, recorded_at, acting_user)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(product_id)
    .bind(&product_name)
    .bind(txn_type)
    .bind(quantity)
    .bind(recorded_at)
    .bind(acting_user)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!(
        product = %product_name,
        %txn_type,
        quantity,
        new_quantity,
        "stock movement applied"
    );
    Ok(Applied {
        product_name,
        new_quantity,
        low_stock,
    })
}

fn ensure_positive_quantity(quantity: i64) -> Result<(), ApiError> {
    if quantity <= 0 {
        return Err(ApiError::InvalidInput(
            "Quantity must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// Classifies a conditional UPDATE that matched no row: the product either
/// does not exist, or exists with too little stock. Nothing has been written
/// in either case.
fn missed_update_error(available: Option<i64>, requested: i64) -> ApiError {
    match available {
        Some(available) => ApiError::InsufficientStock {
            available,
            requested,
        },
        None => ApiError::NotFound("Product not found".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txn_type_parses_wire_values() {
        assert_eq!("IN".parse::<TxnType>().unwrap(), TxnType::In);
        assert_eq!("OUT".parse::<TxnType>().unwrap(), TxnType::Out);
    }

    #[test]
    fn txn_type_rejects_anything_else() {
        assert!("in".parse::<TxnType>().is_err());
        assert!("TRANSFER".parse::<TxnType>().is_err());
        assert!("".parse::<TxnType>().is_err());
    }

    #[test]
    fn txn_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TxnType::In).unwrap(), r#""IN""#);
        assert_eq!(serde_json::to_string(&TxnType::Out).unwrap(), r#""OUT""#);
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        assert!(ensure_positive_quantity(1).is_ok());
        let err = ensure_positive_quantity(0).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(ensure_positive_quantity(-5).is_err());
    }

    #[test]
    fn out_exceeding_stock_reports_shortfall() {
        let err = missed_update_error(Some(3), 10);
        match err {
            ApiError::InsufficientStock {
                available,
                requested,
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn missing_product_is_not_found() {
        let err = missed_update_error(None, 10);
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
