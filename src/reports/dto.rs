use anyhow::Context;
use serde::Serialize;

use crate::products::repo::Product;

#[derive(Debug, Serialize)]
pub struct LowStockItem {
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "lowStock")]
    pub low_stock: i64,
}

#[derive(Debug, Serialize)]
pub struct LowStockResponse {
    pub count: usize,
    pub items: Vec<LowStockItem>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub products: i64,
    #[serde(rename = "lowStock")]
    pub low_stock: i64,
    #[serde(rename = "inventoryValue")]
    pub inventory_value: f64,
    #[serde(rename = "transactionsToday")]
    pub transactions_today: i64,
}

#[derive(Debug, Serialize)]
pub struct QuantityPoint {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct ValuePoint {
    pub name: String,
    pub value: f64,
}

/// Renders the inventory export: one row per product plus a computed
/// total-value column.
pub fn inventory_csv(products: &[Product]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Product Name",
        "Category",
        "Supplier",
        "Quantity",
        "Low Stock",
        "Cost Price",
        "Total Value",
    ])?;
    for p in products {
        let total = p.quantity as f64 * p.cost_price;
        writer.write_record([
            p.name.as_str(),
            p.category.as_str(),
            p.supplier.as_str(),
            &p.quantity.to_string(),
            &p.low_stock.to_string(),
            &p.cost_price.to_string(),
            &total.to_string(),
        ])?;
    }
    writer.into_inner().context("flush csv writer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn product(name: &str, quantity: i64, cost_price: f64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            category: "General".into(),
            supplier: "Acme".into(),
            quantity,
            low_stock: 5,
            cost_price,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn csv_has_header_and_total_column() {
        let bytes = inventory_csv(&[product("Widget", 4, 2.5)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Product Name,Category,Supplier,Quantity,Low Stock,Cost Price,Total Value"
        );
        assert_eq!(lines.next().unwrap(), "Widget,General,Acme,4,5,2.5,10");
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_empty_catalog_is_header_only() {
        let bytes = inventory_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn csv_quotes_embedded_commas() {
        let bytes = inventory_csv(&[product("Nuts, assorted", 1, 1.0)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#""Nuts, assorted""#));
    }
}
