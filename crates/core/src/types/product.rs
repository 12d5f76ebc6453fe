//! The catalog product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, ProductId};

/// A catalog product.
///
/// Products are immutable once fetched: the storefront reads them from the
/// product table at startup and never mutates them locally. Field names
/// serialize in camelCase to match the JSON API (`inStock`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in rupees. Non-negative; enforced by the product table.
    pub price: Decimal,
    pub description: String,
    /// URL of the product image.
    pub image: String,
    pub category: Category,
    pub subcategory: String,
    pub in_stock: bool,
    /// Size labels in display order (e.g. `S`, `M`, `L` or `2-4Y`).
    pub sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: ProductId::new(1),
            name: "Classic Cotton Briefs".to_string(),
            price: Decimal::new(299, 0),
            description: "Comfortable cotton briefs.".to_string(),
            image: "https://example.com/briefs.jpg".to_string(),
            category: Category::Men,
            subcategory: "Innerwear".to_string(),
            in_stock: true,
            sizes: vec!["S".to_string(), "M".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["inStock"], serde_json::Value::Bool(true));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("in_stock").is_none());
        assert_eq!(json["category"], "Men");
    }
}
