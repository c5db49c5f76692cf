use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::repo::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    pub quantity: i64,
    #[serde(rename = "lowStock", default)]
    pub low_stock: i64,
    #[serde(rename = "costPrice")]
    pub cost_price: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub supplier: String,
    pub quantity: i64,
    #[serde(rename = "lowStock")]
    pub low_stock: i64,
    #[serde(rename = "costPrice")]
    pub cost_price: f64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            supplier: p.supplier,
            quantity: p.quantity,
            low_stock: p.low_stock,
            cost_price: p.cost_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn response_uses_camel_case_keys() {
        let resp = ProductResponse::from(Product {
            id: Uuid::new_v4(),
            name: "Widget".into(),
            category: "Hardware".into(),
            supplier: "Acme".into(),
            quantity: 12,
            low_stock: 5,
            cost_price: 9.5,
            created_at: OffsetDateTime::now_utc(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["lowStock"], 5);
        assert_eq!(json["costPrice"], 9.5);
        assert!(json.get("low_stock").is_none());
    }

    #[test]
    fn create_request_defaults_optional_fields() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name":"Bolt","quantity":100,"costPrice":0.25}"#,
        )
        .unwrap();
        assert_eq!(req.category, "");
        assert_eq!(req.low_stock, 0);
    }
}
