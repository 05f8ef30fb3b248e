//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    JSON 9.99 ──► Decimal "9.99" ──► 999 cents ──► INTEGER column       │
//! │                                                                         │
//! │  Sorting by price in SQL compares integers, never floats.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Prices travel as plain JSON numbers (`9.99`). Incoming numbers are parsed
//! through [`rust_decimal::Decimal`] so no binary rounding leaks into the
//! stored value, and anything finer than a cent is rejected.
//!
//! A JSON number is an `f64` on both sides of the wire, which only carries
//! 15 significant digits exactly. Amounts are therefore capped at
//! [`Money::MAX`] (`9999999999999.99`); larger ones are rejected rather than
//! rounded.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(999);
//! assert_eq!(price.to_string(), "9.99");
//!
//! let parsed: Money = serde_json::from_str("9.99").unwrap();
//! assert_eq!(parsed, price);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: the type itself allows negatives; the boundary
///   validator is what rejects negative prices.
/// - **Single field tuple struct**: zero-cost abstraction over i64, which is
///   also the storage representation (`price_cents`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude, in cents, that survives a trip through a JSON
    /// number unchanged (15 significant digits).
    pub const MAX_CENTS: i64 = 999_999_999_999_999;

    /// Largest accepted amount.
    pub const MAX: Money = Money(Self::MAX_CENTS);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an exact decimal amount into cents.
    ///
    /// ## Rules
    /// - At most two fractional digits (`9.99` ok, `9.999` rejected)
    /// - Magnitude at most [`Money::MAX`]
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_decimal(Decimal::new(999, 2)).unwrap();
    /// assert_eq!(price.cents(), 999);
    ///
    /// assert!(Money::from_decimal(Decimal::new(9999, 3)).is_err());
    /// ```
    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(price_overflow)?;

        if !scaled.fract().is_zero() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must have at most 2 decimal places".to_string(),
            });
        }

        match scaled.to_i64() {
            Some(cents) if cents.abs() <= Self::MAX_CENTS => Ok(Money(cents)),
            _ => Err(price_overflow()),
        }
    }

    /// Returns the value as an exact decimal with two fractional digits.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

fn price_overflow() -> ValidationError {
    ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: Money::MAX_CENTS / 100,
    }
}

/// Formats as a plain decimal: `9.99`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Correctly rounded division gives the double closest to the decimal,
        // which serde_json prints back as the short form ("9.99"). Exact up
        // to MAX_CENTS.
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as 9.99")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        // Past MAX the double no longer pins down a single cent value
        if !value.is_finite() || value.abs() > Money::MAX_CENTS as f64 / 100.0 {
            return Err(E::custom(price_overflow()));
        }

        // Display for f64 yields the shortest string that round-trips,
        // i.e. exactly what the client wrote for ordinary prices.
        parse_decimal(&value.to_string())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        parse_decimal(value)
    }
}

fn parse_decimal<E: de::Error>(raw: &str) -> Result<Money, E> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|_| E::custom(format!("invalid decimal amount: {raw}")))?;
    Money::from_decimal(value).map_err(E::custom)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_from_decimal_rejects_sub_cent_amounts() {
        assert_eq!(
            Money::from_decimal(Decimal::new(1250, 3)).unwrap().cents(),
            125
        );
        let err = Money::from_decimal(Decimal::new(12501, 4)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_amounts_beyond_max_are_rejected() {
        let price: Money = serde_json::from_str("9999999999999.99").unwrap();
        assert_eq!(price, Money::MAX);
        assert_eq!(
            serde_json::to_string(&Money::MAX).unwrap(),
            "9999999999999.99"
        );

        let price: Money = serde_json::from_str("-9999999999999.99").unwrap();
        assert_eq!(price.cents(), -Money::MAX_CENTS);

        assert!(serde_json::from_str::<Money>("10000000000000").is_err());
        assert!(serde_json::from_str::<Money>("10000000000000.01").is_err());
        assert!(serde_json::from_str::<Money>("90071992547409.93").is_err());
        assert!(serde_json::from_str::<Money>("\"90071992547409.93\"").is_err());

        let err = Money::from_decimal(Decimal::new(1_000_000_000_000_000, 2)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(999).to_decimal().to_string(), "9.99");
    }

    #[test]
    fn test_json_numbers_parse_exactly() {
        let price: Money = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.cents(), 999);

        // 0.1 + 0.2 style values must not drift
        let price: Money = serde_json::from_str("0.3").unwrap();
        assert_eq!(price.cents(), 30);

        let price: Money = serde_json::from_str("12").unwrap();
        assert_eq!(price.cents(), 1200);

        let price: Money = serde_json::from_str("\"4.50\"").unwrap();
        assert_eq!(price.cents(), 450);

        let price: Money = serde_json::from_str("-1").unwrap();
        assert!(price.is_negative());
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(serde_json::from_str::<Money>("9.999").is_err());
        assert!(serde_json::from_str::<Money>("\"cheap\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(999)).unwrap(), "9.99");
        let value = serde_json::to_value(Money::from_cents(500)).unwrap();
        assert_eq!(value.as_f64(), Some(5.0));
    }
}
