//! # Money Module
//!
//! Provides the `Money` type for prices, salaries and sale amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As a double, a salary of 50000.10 is stored as 50000.1000000000014…    │
//! │  Summing a month of sale amounts drifts by fractions of a paisa.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    "50000.10" ──parse──► 5_000_010 ──store──► INTEGER ──► "50000.10"    │
//! │    Round trips through the database are exact.                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dealer_core::money::Money;
//!
//! let price = Money::parse_decimal("2450000.50").unwrap();
//! assert_eq!(price.cents(), 245_000_050);
//! assert_eq!(price.to_string(), "2450000.50");
//!
//! let total = price + Money::from_cents(50);
//! assert_eq!(total.to_string(), "2450001.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::CommissionRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (hundredths of the display currency).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections
/// - **No currency symbol**: Display prints the bare amount; reports prefix
///   the configured symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::money::Money;
    ///
    /// let amount = Money::from_cents(100_000); // 1000.00
    /// assert_eq!(amount.units(), 1000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole units and hundredths.
    ///
    /// For negative amounts only the whole part carries the sign:
    /// `from_units(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_units(units: i64, hundredths: i64) -> Self {
        if units < 0 {
            Money(units * 100 - hundredths)
        } else {
            Money(units * 100 + hundredths)
        }
    }

    /// Parses a plain decimal string such as `"1000"`, `"1000.5"` or
    /// `"-12.34"`.
    ///
    /// At most two fraction digits are accepted; anything else (exponents,
    /// thousands separators, stray characters, overflow) yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("50000").unwrap().cents(), 5_000_000);
    /// assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
    /// assert!(Money::parse_decimal("12.345").is_none());
    /// assert!(Money::parse_decimal("abc").is_none());
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if fraction.len() > 2 {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };

        let cents = whole_value.checked_mul(100)?.checked_add(fraction_value)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the hundredths portion (always 0-99).
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a basis-point rate, rounding half away from zero to the
    /// nearest minor unit.
    ///
    /// ## Implementation
    /// Integer math on the magnitude: `(|amount| * bps + 5000) / 10000`,
    /// then the sign is restored. i128 keeps large amounts from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use dealer_core::money::Money;
    /// use dealer_core::types::CommissionRate;
    ///
    /// let amount = Money::from_cents(100_000);         // 1000.00
    /// let share = amount.apply_rate(CommissionRate::from_bps(1000)); // 10%
    /// assert_eq!(share.cents(), 10_000);               // 100.00
    /// ```
    pub fn apply_rate(&self, rate: CommissionRate) -> Money {
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let magnitude = magnitude as i64;
        Money(if self.0 < 0 { -magnitude } else { magnitude })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Prints `1234.56` / `-5.50`; honours width and alignment flags so report
/// columns can use `{:<13}`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.units().abs(), self.hundredths());
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
