//! Aggregate sales figures recorded on a catalog product.

use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Lifetime sales metrics for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SalesMetrics {
    /// Units sold to date.
    pub units_sold: u64,
    /// Revenue to date.
    #[serde(with = "money::decimal")]
    pub revenue: Money,
    /// Average customer rating.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Fraction of units returned (0.0 - 1.0).
    #[serde(default)]
    pub return_rate: f64,
}

impl SalesMetrics {
    /// Revenue per unit sold, or `None` when nothing has sold yet.
    pub fn average_unit_revenue(&self) -> Option<Money> {
        if self.units_sold == 0 {
            return None;
        }
        let per_unit = self.revenue.amount_cents as f64 / self.units_sold as f64;
        Some(Money::from_cents(per_unit.round() as i64))
    }

    /// Estimated number of units returned.
    pub fn returned_units(&self) -> u64 {
        (self.units_sold as f64 * self.return_rate).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_unit_revenue() {
        let metrics = SalesMetrics {
            units_sold: 4,
            revenue: Money::usd(119.96),
            average_rating: Some(4.5),
            return_rate: 0.25,
        };
        assert_eq!(metrics.average_unit_revenue().unwrap().amount_cents, 2999);
        assert_eq!(metrics.returned_units(), 1);
    }

    #[test]
    fn test_no_sales() {
        let metrics = SalesMetrics::default();
        assert!(metrics.average_unit_revenue().is_none());
        assert_eq!(metrics.returned_units(), 0);
    }
}
