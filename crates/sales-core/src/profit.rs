//! Profit and margin calculations.

use serde::Serialize;

use crate::error::CoreError;
use crate::money::{self, Money};

/// Profit breakdown for selling `quantity` units at `price`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitMetrics {
    #[serde(with = "money::decimal")]
    pub profit_per_unit: Money,
    /// Profit as a percentage of price, rounded to 2 places.
    pub margin_percentage: f64,
    #[serde(with = "money::decimal")]
    pub total_revenue: Money,
    #[serde(with = "money::decimal")]
    pub total_profit: Money,
    /// Cost as a percentage of price, rounded to 2 places.
    pub cost_ratio: f64,
}

/// Calculate profit metrics for a product.
///
/// Price and cost are rounded to cents before any arithmetic, so totals are
/// exact multiples of the per-unit figures.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPrice`] if `price` is not positive and
/// [`CoreError::InvalidCost`] if `cost` is negative.
///
/// ```
/// use sales_core::profit::calculate_profit_metrics;
/// let m = calculate_profit_metrics(100.0, 60.0, 1).unwrap();
/// assert_eq!(m.margin_percentage, 40.0);
/// ```
pub fn calculate_profit_metrics(
    price: f64,
    cost: f64,
    quantity: u32,
) -> Result<ProfitMetrics, CoreError> {
    // written so that NaN is rejected too
    if !(price > 0.0) {
        return Err(CoreError::InvalidPrice(price));
    }
    if !(cost >= 0.0) {
        return Err(CoreError::InvalidCost(cost));
    }

    let price = Money::usd(price);
    let cost = Money::usd(cost);
    if !price.is_positive() {
        return Err(CoreError::InvalidPrice(price.to_decimal()));
    }

    let profit_per_unit = price.checked_sub(&cost)?;
    let quantity = i64::from(quantity);

    Ok(ProfitMetrics {
        profit_per_unit,
        margin_percentage: round2(profit_per_unit.percent_of(&price).unwrap_or(0.0)),
        total_revenue: price.checked_mul(quantity)?,
        total_profit: profit_per_unit.checked_mul(quantity)?,
        cost_ratio: round2(cost.percent_of(&price).unwrap_or(0.0)),
    })
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_profit() {
        let m = calculate_profit_metrics(100.0, 60.0, 1).unwrap();
        assert_eq!(m.profit_per_unit, Money::usd(40.0));
        assert_eq!(m.margin_percentage, 40.0);
        assert_eq!(m.total_revenue, Money::usd(100.0));
        assert_eq!(m.total_profit, Money::usd(40.0));
        assert_eq!(m.cost_ratio, 60.0);
    }

    #[test]
    fn test_multiple_quantities() {
        let m = calculate_profit_metrics(29.99, 18.50, 10).unwrap();
        assert_eq!(m.profit_per_unit.amount_cents, 1149);
        assert_eq!(m.total_revenue.amount_cents, 29990);
        assert_eq!(m.total_profit.amount_cents, 11490);
        assert_eq!(m.margin_percentage, 38.31);
        assert_eq!(m.cost_ratio, 61.69);
    }

    #[test]
    fn test_loss_making_product() {
        let m = calculate_profit_metrics(10.0, 12.0, 3).unwrap();
        assert_eq!(m.profit_per_unit.amount_cents, -200);
        assert_eq!(m.total_profit.amount_cents, -600);
        assert_eq!(m.margin_percentage, -20.0);
    }

    #[test]
    fn test_zero_quantity() {
        let m = calculate_profit_metrics(10.0, 4.0, 0).unwrap();
        assert!(m.total_revenue.is_zero());
        assert!(m.total_profit.is_zero());
        assert_eq!(m.margin_percentage, 60.0);
    }

    #[test]
    fn test_invalid_price() {
        assert!(matches!(
            calculate_profit_metrics(-10.0, 5.0, 1),
            Err(CoreError::InvalidPrice(_))
        ));
        assert!(matches!(
            calculate_profit_metrics(0.0, 5.0, 1),
            Err(CoreError::InvalidPrice(_))
        ));
        assert!(matches!(
            calculate_profit_metrics(f64::NAN, 5.0, 1),
            Err(CoreError::InvalidPrice(_))
        ));
        // rounds to zero cents
        assert!(matches!(
            calculate_profit_metrics(0.001, 0.0, 1),
            Err(CoreError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_invalid_cost() {
        assert!(matches!(
            calculate_profit_metrics(10.0, -5.0, 1),
            Err(CoreError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_serializes_as_decimals() {
        let m = calculate_profit_metrics(29.99, 18.50, 10).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["total_profit"], serde_json::json!(114.9));
        assert_eq!(json["profit_per_unit"], serde_json::json!(11.49));
    }
}
