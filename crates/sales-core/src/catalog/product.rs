//! Product records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{InventoryRecord, SalesMetrics, Supplier};
use crate::error::CoreError;
use crate::ids::{CategoryId, ProductId};
use crate::money::{self, Money};

/// Lifecycle status of a product.
///
/// Statuses outside the known vocabulary are kept verbatim so that a catalog
/// never fails to load over a new status string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    /// Product is on sale.
    Active,
    /// Temporarily not on sale.
    Inactive,
    /// No longer sold; kept for history.
    Discontinued,
    /// Not yet published.
    Draft,
    /// Any other status string.
    Other(String),
}

impl ProductStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Discontinued => "discontinued",
            ProductStatus::Draft => "draft",
            ProductStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "active" => ProductStatus::Active,
            "inactive" => ProductStatus::Inactive,
            "discontinued" => ProductStatus::Discontinued,
            "draft" => ProductStatus::Draft,
            other => ProductStatus::Other(other.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        *self == ProductStatus::Active
    }
}

impl From<String> for ProductStatus {
    fn from(s: String) -> Self {
        ProductStatus::parse(&s)
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        status.as_str().to_string()
    }
}

fn percent(part_cents: f64, of: Money) -> Option<f64> {
    (!of.is_zero()).then(|| part_cents / of.amount_cents as f64 * 100.0)
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product key.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Key of the category this product belongs to.
    pub category: CategoryId,
    /// Selling price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Unit cost.
    #[serde(with = "money::decimal")]
    pub cost: Money,
    #[serde(default)]
    pub supplier: Supplier,
    /// Product-type specific attributes; keys vary by product.
    #[serde(default)]
    pub specifications: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub inventory: InventoryRecord,
    #[serde(default)]
    pub sales_metrics: SalesMetrics,
    /// Free-text tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Lifecycle status; a product without one is not counted as active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    pub created_date: Option<NaiveDate>,
    pub updated_date: Option<NaiveDate>,
}

impl Product {
    /// Create a new active product with empty supplier, inventory and metrics.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        price: Money,
        cost: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            cost,
            supplier: Supplier::default(),
            specifications: serde_json::Map::new(),
            inventory: InventoryRecord::default(),
            sales_metrics: SalesMetrics::default(),
            tags: Vec::new(),
            status: Some(ProductStatus::Active),
            created_date: None,
            updated_date: None,
        }
    }

    /// Whether the status is explicitly `active`.
    pub fn is_active(&self) -> bool {
        self.status.as_ref().is_some_and(ProductStatus::is_active)
    }

    /// Unit margin (price minus cost).
    pub fn margin(&self) -> Result<Money, CoreError> {
        self.price.checked_sub(&self.cost)
    }

    /// Margin as a percentage of price.
    pub fn margin_percentage(&self) -> Option<f64> {
        percent(self.margin_cents(), self.price)
    }

    /// Markup as a percentage of cost.
    pub fn markup_percentage(&self) -> Option<f64> {
        percent(self.margin_cents(), self.cost)
    }

    // Computed in f64 so extreme catalog values cannot overflow.
    fn margin_cents(&self) -> f64 {
        self.price.amount_cents as f64 - self.cost.amount_cents as f64
    }

    /// Whether cost exceeds price.
    pub fn is_sold_at_loss(&self) -> bool {
        self.cost.amount_cents > self.price.amount_cents
    }

    /// Look up a specification value as a string.
    pub fn spec_str(&self, key: &str) -> Option<&str> {
        self.specifications.get(key).and_then(|v| v.as_str())
    }

    /// Add a tag, ignoring duplicates.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}
