//! Category records.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category key.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(
        category_id: impl Into<CategoryId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_without_description() {
        let cat: Category =
            serde_json::from_str(r#"{"category_id": "CAT_BOOK", "name": "Books"}"#).unwrap();
        assert_eq!(cat.category_id.as_str(), "CAT_BOOK");
        assert!(cat.description.is_empty());
    }
}
