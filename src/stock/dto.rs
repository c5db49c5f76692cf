use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;
use crate::stock::engine::TxnType;
use crate::stock::repo::LedgerEntry;

#[derive(Debug, Deserialize)]
pub struct AddTransactionForm {
    pub product_id: Uuid,
    pub transaction_type: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub quantity: i64,
    pub date: String,
    #[serde(rename = "actingUser")]
    pub acting_user: String,
}

impl From<LedgerEntry> for TransactionResponse {
    fn from(e: LedgerEntry) -> Self {
        Self {
            id: e.id,
            product_name: e.product_name,
            txn_type: e.txn_type,
            quantity: e.quantity,
            date: clock::format_ledger_timestamp(e.recorded_at),
            acting_user: e.acting_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn response_keys_and_date_format() {
        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            product_name: "Widget".into(),
            txn_type: TxnType::Out,
            quantity: 6,
            recorded_at: datetime!(2026-03-04 21:15:07),
            acting_user: "ops@example.com".into(),
        };
        let json = serde_json::to_value(TransactionResponse::from(entry)).unwrap();
        assert_eq!(json["productName"], "Widget");
        assert_eq!(json["type"], "OUT");
        assert_eq!(json["date"], "04/03/2026, 09:15:07 PM");
        assert_eq!(json["actingUser"], "ops@example.com");
    }
}
