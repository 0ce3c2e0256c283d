//! Product catalog module.
//!
//! Contains types for categories, products, suppliers, inventory and
//! per-product sales metrics.

mod category;
mod inventory;
mod metrics;
mod product;
mod supplier;

pub use category::Category;
pub use inventory::InventoryRecord;
pub use metrics::SalesMetrics;
pub use product::{Product, ProductStatus};
pub use supplier::Supplier;
