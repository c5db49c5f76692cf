//! Low-stock notifier. Alerting is best-effort and decoupled from the
//! mutation: the caller spawns `maybe_alert` and never waits on delivery.
//!
//! De-duplication is one-shot for the lifetime of a product name: once a row
//! exists in email_logs, no further alert fires for that product, even after
//! it restocks and drops below threshold again.

use std::time::Duration;

use sqlx::PgPool;
use time::PrimitiveDateTime;
use tracing::{debug, info, warn};

use crate::clock;
use crate::state::AppState;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// An alert is due iff a threshold is configured and the new quantity is at
/// or below it. A threshold of 0 means "not configured", never "always".
pub fn should_alert(new_quantity: i64, threshold: i64) -> bool {
    threshold > 0 && new_quantity <= threshold
}

pub async fn maybe_alert(state: AppState, product_name: String, new_quantity: i64, threshold: i64) {
    if !should_alert(new_quantity, threshold) {
        return;
    }

    match already_alerted(&state.db, &product_name).await {
        Ok(true) => {
            debug!(product = %product_name, "low stock alert already sent; suppressing");
            return;
        }
        Ok(false) => {}
        Err(e) => {
            warn!(error = %e, product = %product_name, "alert dedup lookup failed");
            return;
        }
    }

    let subject = "Low Stock Alert - SmartStock";
    let body = format!(
        "Hello Admin,\n\n\
         LOW STOCK ALERT\n\n\
         Product: {product_name}\n\
         Current Quantity: {new_quantity}\n\
         Low Stock Threshold: {threshold}\n\n\
         Please restock this item soon.\n\n\
         - SmartStock System\n"
    );

    match tokio::time::timeout(DELIVERY_TIMEOUT, state.mailer.send(subject, &body)).await {
        Ok(Ok(())) => {
            let sent_at = clock::now_civil(state.config.ledger_offset);
            if let Err(e) = record_alert(&state.db, &product_name, sent_at).await {
                warn!(error = %e, product = %product_name, "alert sent but email log insert failed");
            } else {
                info!(
                    product = %product_name,
                    quantity = new_quantity,
                    threshold,
                    "low stock alert sent"
                );
            }
        }
        Ok(Err(e)) => warn!(error = %e, product = %product_name, "low stock alert delivery failed"),
        Err(_) => warn!(product = %product_name, "low stock alert delivery timed out"),
    }
}

async fn already_alerted(db: &PgPool, product_name: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM email_logs WHERE product_name = $1)",
    )
    .bind(product_name)
    .fetch_one(db)
    .await
}

async fn record_alert(
    db: &PgPool,
    product_name: &str,
    sent_at: PrimitiveDateTime,
) -> sqlx::Result<()> {
    // Unique product_name absorbs a concurrent duplicate send.
    sqlx::query(
        "INSERT INTO email_logs (product_name, sent_at) VALUES ($1, $2)
         ON CONFLICT (product_name) DO NOTHING",
    )
    .bind(product_name)
    .bind(sent_at)
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_or_below_threshold() {
        assert!(should_alert(4, 5));
        assert!(should_alert(5, 5));
        assert!(should_alert(0, 5));
    }

    #[test]
    fn silent_above_threshold() {
        assert!(!should_alert(6, 5));
        assert!(!should_alert(100, 5));
    }

    #[test]
    fn zero_threshold_means_not_configured() {
        assert!(!should_alert(0, 0));
        assert!(!should_alert(-1, 0));
        assert!(!should_alert(50, 0));
    }
}
