//! # Money Module
//!
//! Provides the `Money` type for unit prices and totals.
//!
//! ## Integer Money, Decimal Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product API / local store            In memory                         │
//! │  ─────────────────────────            ─────────                         │
//! │  { "price": 10.5 }      ── decode ──► Money(1050)                       │
//! │  { "price": 10.5 }      ◄─ encode ─── Money(1050)                       │
//! │  { "price": 10 }        ◄─ encode ─── Money(1000)                       │
//! │                                                                         │
//! │  Totals are summed in cents, so 0.1 + 0.2 is exactly 0.30.             │
//! │  Arithmetic saturates at the i64 bounds instead of overflowing.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tote_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! assert_eq!(price.multiply_quantity(2).cents(), 2198);
//! assert_eq!(Money::from_major(10.99).unwrap(), price);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::error::ValidationError;

/// Largest cent count an `f64` holds exactly (2^53).
const MAX_EXACT_CENTS: i64 = 9_007_199_254_740_992;

/// Relative slack allowed between `amount * 100` and the nearest cent.
const CENT_TOLERANCE: f64 = 1e-9;

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest amount that survives the decimal wire format unchanged.
    pub const MAX: Money = Money(MAX_EXACT_CENTS);

    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (e.g. dollars) to Money.
    ///
    /// Fails for NaN and infinities, for amounts with more than two decimal
    /// places, and for magnitudes beyond 2^53 cents.
    ///
    /// ```rust
    /// use tote_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10.0).unwrap().cents(), 1000);
    /// assert_eq!(Money::from_major(19.99).unwrap().cents(), 1999);
    /// assert!(Money::from_major(0.125).is_err());
    /// assert!(Money::from_major(1e17).is_err());
    /// assert!(Money::from_major(f64::NAN).is_err());
    /// ```
    pub fn from_major(amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        let scaled = amount * 100.0;
        let cents = scaled.round();

        if cents.abs() > MAX_EXACT_CENTS as f64 {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
            });
        }

        if (scaled - cents).abs() > CENT_TOLERANCE * cents.abs().max(1.0) {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must not have more than two decimal places".to_string(),
            });
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units, for the wire format only.
    #[inline]
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Whole amounts encode as JSON integers (`10`), others as decimals (`10.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_major())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major(amount).map_err(de::Error::custom)
    }
}
