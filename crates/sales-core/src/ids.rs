//! Newtype IDs for type-safe identifiers.
//!
//! Catalog and sales files use string keys such as `PRD_001` or `TXN_00000042`.
//! Wrapping them keeps a product key from being passed where a category key
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Product key, e.g. `PRD_001` in the catalog or `PROD_1000` when generated.
    ProductId
);
define_id!(
    /// Category key, e.g. `CAT_ELEC`.
    CategoryId
);
define_id!(
    /// Sales transaction key, e.g. `TXN_00000042`.
    TransactionId
);
define_id!(
    /// Customer key, e.g. `CUST_1042`.
    CustomerId
);
define_id!(
    /// Sales region key, e.g. `NA_EAST`.
    RegionId
);

/// Format a zero-padded, prefixed key such as `TXN_00000042`.
pub fn padded_key(prefix: &str, n: u64, width: usize) -> String {
    format!("{}_{:0width$}", prefix, n, width = width)
}
