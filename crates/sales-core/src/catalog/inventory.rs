//! Inventory tracking for a catalog product.

use serde::{Deserialize, Serialize};

/// Stock position of a product across warehouses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InventoryRecord {
    /// Units currently in stock.
    pub stock_quantity: i64,
    /// Stock level at or below which the product should be reordered.
    pub reorder_level: i64,
    /// Warehouse location codes holding this product.
    #[serde(default)]
    pub warehouse_locations: Vec<String>,
}

impl InventoryRecord {
    pub fn new(stock_quantity: i64, reorder_level: i64) -> Self {
        Self {
            stock_quantity,
            reorder_level,
            warehouse_locations: Vec::new(),
        }
    }

    /// Check if stock has fallen to the reorder threshold.
    pub fn needs_reorder(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity <= 0
    }

    /// Add a warehouse location, ignoring duplicates.
    pub fn add_location(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.warehouse_locations.contains(&code) {
            self.warehouse_locations.push(code);
        }
    }

    /// Location codes that appear more than once.
    pub fn duplicate_locations(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for code in &self.warehouse_locations {
            if !seen.insert(code.as_str()) && !dupes.contains(&code.as_str()) {
                dupes.push(code.as_str());
            }
        }
        dupes
    }
}
