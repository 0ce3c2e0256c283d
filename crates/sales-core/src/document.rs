//! The catalog document: a versioned list of categories, the products that
//! reference them, and aggregate metadata.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product};
use crate::error::CoreError;
use crate::ids::CategoryId;

/// Version and category list of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogHeader {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Aggregate counters and provenance recorded alongside the products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Metadata {
    pub total_products: usize,
    pub active_products: usize,
    pub total_categories: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    /// Any further provenance fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A complete catalog document as stored in `products.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    pub catalog: CatalogHeader,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl CatalogDocument {
    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let doc = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            products = doc.products.len(),
            categories = doc.catalog.categories.len(),
            "Loaded catalog"
        );
        Ok(doc)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a category by key.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.catalog.categories.iter().find(|c| &c.category_id == id)
    }

    /// Products belonging to a category, in document order.
    pub fn products_in_category<'a>(
        &'a self,
        id: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| &p.category == id)
    }

    /// Products whose status is `active`.
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active())
    }

    /// Metadata with the counters recomputed from the document content.
    ///
    /// Provenance fields are carried over unchanged.
    pub fn recompute_metadata(&self) -> Metadata {
        Metadata {
            total_products: self.products.len(),
            active_products: self.active_products().count(),
            total_categories: self.catalog.categories.len(),
            ..self.metadata.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductStatus;
    use crate::money::Money;

    fn sample() -> CatalogDocument {
        let json = r#"{
            "catalog": {
                "version": "1.2",
                "last_updated": "2024-06-20T10:30:00Z",
                "categories": [
                    {"category_id": "CAT_A", "name": "A", "description": "first"},
                    {"category_id": "CAT_B", "name": "B", "description": "second"}
                ]
            },
            "products": [
                {"product_id": "P1", "name": "One", "category": "CAT_A", "price": 10.0, "cost": 5.0, "status": "active"},
                {"product_id": "P2", "name": "Two", "category": "CAT_A", "price": 20.0, "cost": 8.0, "status": "discontinued"},
                {"product_id": "P3", "name": "Three", "category": "CAT_B", "price": 30.0, "cost": 9.0}
            ],
            "metadata": {
                "total_products": 3,
                "active_products": 1,
                "total_categories": 2,
                "data_source": "sample",
                "schema_revision": 4
            }
        }"#;
        CatalogDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn test_parse_document() {
        let doc = sample();
        assert_eq!(doc.catalog.version, "1.2");
        assert_eq!(doc.products.len(), 3);
        assert_eq!(doc.products[1].status, Some(ProductStatus::Discontinued));
        assert_eq!(doc.products[2].status, None);
        assert_eq!(doc.products[2].price, Money::usd(30.0));
        assert_eq!(
            doc.metadata.extra.get("schema_revision"),
            Some(&serde_json::json!(4))
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let doc = sample();
        let cat_a = CategoryId::new("CAT_A");
        assert_eq!(doc.category(&cat_a).map(|c| c.name.as_str()), Some("A"));
        assert!(doc.category(&CategoryId::new("CAT_Z")).is_none());
        assert_eq!(doc.products_in_category(&cat_a).count(), 2);
        assert_eq!(doc.active_products().count(), 1);
    }

    #[test]
    fn test_recompute_metadata_keeps_provenance() {
        let mut doc = sample();
        doc.products.pop();
        let meta = doc.recompute_metadata();
        assert_eq!(meta.total_products, 2);
        assert_eq!(meta.active_products, 1);
        assert_eq!(meta.total_categories, 2);
        assert_eq!(meta.data_source.as_deref(), Some("sample"));
        assert!(meta.extra.contains_key("schema_revision"));
    }

    #[test]
    fn test_product_without_status_is_not_active() {
        let mut doc = sample();
        assert!(!doc.products[2].is_active());
        assert_eq!(doc.recompute_metadata().active_products, 1);

        doc.products[2].status = Some(ProductStatus::Active);
        assert_eq!(doc.recompute_metadata().active_products, 2);

        let json = doc.to_json_pretty().unwrap();
        let again = CatalogDocument::from_json_str(&json).unwrap();
        assert_eq!(again.active_products().count(), 2);
    }

    #[test]
    fn test_pretty_json_reparses() {
        let doc = sample();
        let json = doc.to_json_pretty().unwrap();
        let again = CatalogDocument::from_json_str(&json).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, sample().to_json_pretty().unwrap()).unwrap();

        let doc = CatalogDocument::from_path(&path).unwrap();
        assert_eq!(doc.products.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CatalogDocument::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
