//! Row types for the pipeline tables.
//!
//! Every column the source files may leave empty is an `Option`; the quality
//! checks count those gaps rather than rejecting the row.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use sales_core::catalog::Product;
use sales_core::money::{self, Money};
use sales_core::profit::round2;
use sales_core::{CustomerId, ProductId, TransactionId};

/// One sales transaction as read from the sales CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub transaction_id: TransactionId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// Generated files name this column `date`.
    #[serde(default, alias = "date")]
    pub sale_date: Option<NaiveDate>,
    /// Whole units; integral decimals such as `2.0` are accepted.
    #[serde(default, deserialize_with = "whole_number")]
    pub quantity: Option<i64>,
    #[serde(default, with = "money::decimal_opt")]
    pub unit_price: Option<Money>,
    #[serde(default, with = "money::decimal_opt")]
    pub total_amount: Option<Money>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sales_rep: Option<String>,
    /// Sales channel; present only in generated files and not stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v.abs() <= LIMIT => Ok(Some(v as i64)),
        Some(v) => Err(D::Error::custom(format!("expected a whole number, got {}", v))),
    }
}

/// A product row in the flat products layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, with = "money::decimal_opt")]
    pub cost: Option<Money>,
    #[serde(default, with = "money::decimal_opt")]
    pub price: Option<Money>,
    /// Markup on cost, in percent.
    #[serde(default)]
    pub margin: Option<f64>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        let brand = Some(product.supplier.name.clone()).filter(|n| !n.is_empty());

        Self {
            product_id: product.product_id.clone(),
            name: Some(product.name.clone()),
            category: Some(product.category.to_string()),
            subcategory: product.spec_str("subcategory").map(str::to_string),
            brand,
            cost: Some(product.cost),
            price: Some(product.price),
            margin: product.markup_percentage().map(round2),
        }
    }
}

/// A row of the `monthly_sales` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub year: i64,
    pub month: i64,
    pub region: Option<String>,
    pub transaction_count: i64,
    pub total_revenue: f64,
    pub avg_transaction_value: Option<f64>,
    pub total_quantity: i64,
}

/// A row of the `product_performance` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub product_id: ProductId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub transaction_count: i64,
    pub total_revenue: f64,
    pub total_quantity_sold: i64,
    pub avg_selling_price: Option<f64>,
    pub cost: Option<f64>,
    pub margin_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::catalog::Supplier;

    #[test]
    fn test_product_record_from_catalog() {
        let mut product = Product::new(
            "PRD_001",
            "Headphones",
            "CAT_ELEC",
            Money::usd(150.0),
            Money::usd(100.0),
        );
        product.supplier = Supplier {
            name: "SoundWave".into(),
            contact: String::new(),
            rating: None,
        };
        product
            .specifications
            .insert("subcategory".into(), serde_json::json!("Audio"));

        let record = ProductRecord::from(&product);
        assert_eq!(record.brand.as_deref(), Some("SoundWave"));
        assert_eq!(record.subcategory.as_deref(), Some("Audio"));
        assert_eq!(record.category.as_deref(), Some("CAT_ELEC"));
        assert_eq!(record.margin, Some(50.0));
    }

    #[test]
    fn test_product_record_without_supplier_or_cost() {
        let product = Product::new("P", "Free sample", "C", Money::usd(1.0), Money::usd(0.0));
        let record = ProductRecord::from(&product);
        assert!(record.brand.is_none());
        assert!(record.subcategory.is_none());
        assert!(record.margin.is_none());
    }

    #[test]
    fn test_sale_record_accepts_date_alias() {
        let json = r#"{"transaction_id": "TXN_1", "date": "2024-02-01", "quantity": 2}"#;
        let sale: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(sale.sale_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert!(sale.total_amount.is_none());
        assert!(sale.customer_id.is_none());
    }

    #[test]
    fn test_sale_quantity_accepts_whole_decimals() {
        let sale: SaleRecord =
            serde_json::from_str(r#"{"transaction_id": "TXN_1", "quantity": 3.0}"#).unwrap();
        assert_eq!(sale.quantity, Some(3));

        let sale: SaleRecord =
            serde_json::from_str(r#"{"transaction_id": "TXN_1", "quantity": null}"#).unwrap();
        assert_eq!(sale.quantity, None);

        let err = serde_json::from_str::<SaleRecord>(r#"{"transaction_id": "TXN_1", "quantity": 1.5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("whole number"));

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["quantity"], serde_json::Value::Null);
    }
}
