//! Supplier information attached to a product.

use serde::{Deserialize, Serialize};

/// The supplier a product is sourced from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Supplier {
    pub name: String,
    /// Contact e-mail or phone.
    #[serde(default)]
    pub contact: String,
    /// Supplier rating, usually on a 0-5 scale.
    #[serde(default)]
    pub rating: Option<f64>,
}
