//! Money type for representing monetary values.
//!
//! All sales data is in US dollars. Amounts are held in cents so that revenue
//! totals over many transactions add up exactly. Catalog and CSV files carry
//! amounts as decimals; the [`decimal`] and [`decimal_opt`] modules convert at
//! the serde boundary.

use std::fmt;
use std::iter::Sum;

use crate::error::CoreError;

/// A US dollar amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money {
    pub amount_cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { amount_cents: 0 };

    pub fn from_cents(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount, rounding half away from zero.
    ///
    /// ```
    /// use sales_core::money::Money;
    /// assert_eq!(Money::usd(49.99).amount_cents, 4999);
    /// ```
    pub fn usd(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99", "-$2.50").
    pub fn display(&self) -> String {
        if self.amount_cents < 0 {
            format!("-${:.2}", -self.to_decimal())
        } else {
            format!("${:.2}", self.to_decimal())
        }
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, CoreError> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(Money::from_cents)
            .ok_or(CoreError::Overflow)
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, CoreError> {
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(Money::from_cents)
            .ok_or(CoreError::Overflow)
    }

    /// Multiply by a unit count.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, CoreError> {
        self.amount_cents
            .checked_mul(factor)
            .map(Money::from_cents)
            .ok_or(CoreError::Overflow)
    }

    /// Multiply by a decimal factor, rounding to the nearest cent.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::from_cents((self.amount_cents as f64 * factor).round() as i64)
    }

    /// Ratio of this amount to another, as a percentage.
    ///
    /// Returns `None` when `other` is zero.
    pub fn percent_of(&self, other: &Money) -> Option<f64> {
        if other.amount_cents == 0 {
            return None;
        }
        Some(self.amount_cents as f64 / other.amount_cents as f64 * 100.0)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        Money::from_cents(iter.map(|m| m.amount_cents).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serialize a [`Money`] as a plain decimal (`29.99`).
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        f64::deserialize(deserializer).map(Money::usd)
    }
}

/// Like [`decimal`], for optional amounts. Missing and null values are `None`.
pub mod decimal_opt {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        money: &Option<Money>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match money {
            Some(m) => serializer.serialize_some(&m.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        let amount = Option::<f64>::deserialize(deserializer)?;
        Ok(amount.map(Money::usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_money_usd() {
        assert_eq!(Money::usd(49.99).amount_cents, 4999);
        assert_eq!(Money::usd(-2.5).amount_cents, -250);

        // 0.1 + 0.2 is 0.30000000000000004 in f64
        assert_eq!(Money::usd(0.1 + 0.2).amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).display(), "$49.99");
        assert_eq!(Money::from_cents(-250).display(), "-$2.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(300);
        assert_eq!(a.checked_add(&b).unwrap().amount_cents, 1300);
        assert_eq!(a.checked_sub(&b).unwrap().amount_cents, 700);
        assert_eq!(a.checked_mul(3).unwrap().amount_cents, 3000);
        assert_eq!(a.multiply_decimal(1.075).amount_cents, 1075);
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::from_cents(i64::MAX);
        assert!(matches!(big.checked_mul(2), Err(CoreError::Overflow)));
        assert!(matches!(
            Money::from_cents(i64::MIN).checked_sub(&Money::from_cents(1)),
            Err(CoreError::Overflow)
        ));
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::usd(10.10), Money::usd(20.20), Money::usd(0.01)];
        let total: Money = values.iter().sum();
        assert_eq!(total.amount_cents, 3031);
    }

    #[test]
    fn test_percent_of() {
        let part = Money::usd(25.0);
        assert_eq!(part.percent_of(&Money::usd(100.0)), Some(25.0));
        assert_eq!(part.percent_of(&Money::ZERO), None);
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
            #[serde(with = "decimal_opt", default)]
            cost: Option<Money>,
        }

        let p: Priced = serde_json::from_str(r#"{"price": 29.99}"#).unwrap();
        assert_eq!(p.price.amount_cents, 2999);
        assert!(p.cost.is_none());

        let p: Priced = serde_json::from_str(r#"{"price": 5, "cost": 1.5}"#).unwrap();
        assert_eq!(p.price.amount_cents, 500);
        assert_eq!(p.cost.unwrap().amount_cents, 150);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["price"], serde_json::json!(5.0));
    }
}
