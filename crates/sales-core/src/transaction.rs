//! Validation of individual, loosely-typed sales transaction records.
//!
//! Records arrive as arbitrary JSON (pasted on the command line, or read from
//! a feed), so the checks work on [`serde_json::Value`] rather than a typed
//! struct: a record with the wrong shape is a finding, not a parse failure.

use serde::Serialize;
use serde_json::Value;

/// Fields every transaction must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "transaction_id",
    "date",
    "product_id",
    "customer_id",
    "quantity",
    "unit_price",
    "total_amount",
];

/// Default tolerance when comparing `quantity * unit_price` to `total_amount`.
pub const DEFAULT_TOTAL_TOLERANCE: f64 = 0.01;

/// Result of validating one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TransactionValidation {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }
}

/// Validate a single transaction record.
///
/// Missing required fields and non-positive `quantity` / `unit_price` make the
/// record invalid. A total that differs from `quantity * unit_price` by more
/// than `tolerance` only produces a warning.
pub fn validate_transaction(record: &Value, tolerance: f64) -> TransactionValidation {
    let mut result = TransactionValidation::new();

    let Some(fields) = record.as_object() else {
        result.error("Transaction must be a JSON object");
        return result;
    };

    for field in REQUIRED_FIELDS {
        if !fields.contains_key(field) {
            result.error(format!("Missing required field: {}", field));
        }
    }

    let quantity = fields.get("quantity");
    if let Some(q) = quantity {
        if !is_positive_number(q) {
            result.error("Quantity must be a positive number");
        }
    }

    let unit_price = fields.get("unit_price");
    if let Some(p) = unit_price {
        if !is_positive_number(p) {
            result.error("Unit price must be a positive number");
        }
    }

    let total = fields.get("total_amount").and_then(Value::as_f64);
    if let (Some(q), Some(p), Some(total)) = (
        quantity.and_then(Value::as_f64),
        unit_price.and_then(Value::as_f64),
        total,
    ) {
        let expected = q * p;
        if (expected - total).abs() > tolerance {
            result.warnings.push(format!(
                "Total amount mismatch: expected {:.2}, got {:.2}",
                expected, total
            ));
        }
    }

    result
}

fn is_positive_number(value: &Value) -> bool {
    value.as_f64().map(|n| n > 0.0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "transaction_id": "TXN_001",
            "date": "2024-01-15",
            "product_id": "PRD_101",
            "customer_id": "CUST_123",
            "quantity": 2,
            "unit_price": 29.99,
            "total_amount": 59.98
        })
    }

    #[test]
    fn test_valid_transaction() {
        let result = validate_transaction(&valid_record(), DEFAULT_TOTAL_TOLERANCE);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let record = json!({"transaction_id": "TXN_001", "quantity": 2});
        let result = validate_transaction(&record, DEFAULT_TOTAL_TOLERANCE);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 5);
        assert!(result
            .errors
            .contains(&"Missing required field: date".to_string()));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut record = valid_record();
        record["quantity"] = json!(-1);
        let result = validate_transaction(&record, DEFAULT_TOTAL_TOLERANCE);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Quantity must be a positive number")));
    }

    #[test]
    fn test_non_numeric_price() {
        let mut record = valid_record();
        record["unit_price"] = json!("29.99");
        let result = validate_transaction(&record, DEFAULT_TOTAL_TOLERANCE);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Unit price must be a positive number"]);
        // no arithmetic on a string price
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_total_mismatch_is_warning() {
        let mut record = valid_record();
        record["total_amount"] = json!(100.0);
        let result = validate_transaction(&record, DEFAULT_TOTAL_TOLERANCE);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["Total amount mismatch: expected 59.98, got 100.00"]
        );
    }

    #[test]
    fn test_not_an_object() {
        let result = validate_transaction(&json!([1, 2, 3]), DEFAULT_TOTAL_TOLERANCE);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }
}
