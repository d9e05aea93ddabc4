//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog sends prices as JSON numbers (`109.95`). They are held as a
//! [`Decimal`] so that line subtotals and cart totals do not drift, and are
//! written back as JSON numbers so a persisted cart looks like the records it
//! was built from: whole amounts as integers (`64`), others as floats
//! (`109.95`).

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog price in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "json_number")] Decimal);

impl Price {
    /// A price of zero, used as the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

mod json_number {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        match amount.is_integer().then(|| amount.to_i64()).flatten() {
            Some(whole) => serializer.serialize_i64(whole),
            None => rust_decimal::serde::float::serialize(amount, serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));
    }

    #[test]
    fn test_serialize_as_json_number() {
        let json = serde_json::to_string(&Price::from_cents(999)).unwrap();
        assert_eq!(json, "9.99");
    }

    #[test]
    fn test_whole_amount_keeps_integer_shape() {
        let price: Price = serde_json::from_str("64").unwrap();
        assert_eq!(price, Price::from_cents(6400));
        assert_eq!(serde_json::to_string(&price).unwrap(), "64");
        assert_eq!(serde_json::to_string(&Price::from_cents(6400)).unwrap(), "64");
    }

    #[test]
    fn test_fractional_amount_round_trips() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "109.95");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::from_cents(999).display(), "$9.99");
        assert_eq!(Price::new(Decimal::new(223, 1)).display(), "$22.30");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::from_cents(999);
        assert_eq!(unit.times(3), Price::from_cents(2997));

        let total: Price = [unit, unit.times(2)].into_iter().sum();
        assert_eq!(total, Price::from_cents(2997));
    }
}
