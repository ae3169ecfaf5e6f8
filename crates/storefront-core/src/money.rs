//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    10.0 * (1.0 - 0.9) = 0.9999999999999998                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Coupons are stored as basis points, exchange rates as               │
//! │    parts-per-million. Every multiplication runs in i128 and rounds      │
//! │    once, half away from zero, to the nearest cent.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::types::DiscountRate;
//!
//! let price = Money::from_major_minor(10, 0); // $10.00
//! let discounted = price.apply_discount(DiscountRate::from_bps(1000)).unwrap();
//! assert_eq!(discounted.cents(), 900);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::{DiscountRate, ExchangeRate};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// Signed so that out-of-domain input (a negative price) can be represented
/// and rejected by the rules rather than by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
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

    /// Returns `self * (1 - rate)`, rounded to the nearest cent.
    ///
    /// `None` when the result does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::DiscountRate;
    ///
    /// let price = Money::from_cents(1000);
    /// assert_eq!(price.apply_discount(DiscountRate::from_bps(2000)).unwrap().cents(), 800);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Option<Money> {
        let discount = round_div(self.0 as i128 * rate.bps() as i128, 10_000);
        narrow(self.0 as i128 - discount)
    }

    /// Converts this amount with an exchange rate, rounded to the nearest cent.
    ///
    /// `None` when the converted amount does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::ExchangeRate;
    ///
    /// let usd = Money::from_cents(1000);
    /// let aud = usd.convert(ExchangeRate::from_micros(1_500_000)).unwrap();
    /// assert_eq!(aud.cents(), 1500);
    /// ```
    pub fn convert(&self, rate: ExchangeRate) -> Option<Money> {
        narrow(round_div(self.0 as i128 * rate.micros() as i128, 1_000_000))
    }

    /// Like `Display`, but a zero cents part is left off: `$14`, `$10.99`.
    pub fn to_compact_string(&self) -> String {
        if self.cents_part() != 0 {
            return self.to_string();
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}${}", sign, self.dollars().abs())
    }
}

fn narrow(cents: i128) -> Option<Money> {
    i64::try_from(cents).ok().map(Money::from_cents)
}

/// Integer division rounding half away from zero.
fn round_div(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$10.99` / `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
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
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(1400).to_string(), "$14.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    fn cents(value: Option<Money>) -> Option<i64> {
        value.map(|money| money.cents())
    }

    #[test]
    fn test_apply_discount() {
        let price = Money::from_cents(1000);
        assert_eq!(cents(price.apply_discount(DiscountRate::from_bps(1000))), Some(900));
        assert_eq!(cents(price.apply_discount(DiscountRate::from_bps(2000))), Some(800));
    }

    #[test]
    fn test_apply_discount_rounds_to_nearest_cent() {
        // $0.99 at 15% off: discount 14.85 cents → 15 cents
        let price = Money::from_cents(99);
        assert_eq!(cents(price.apply_discount(DiscountRate::from_bps(1500))), Some(84));
    }

    #[test]
    fn test_apply_discount_out_of_range_is_none() {
        let most_negative = Money::from_cents(i64::MIN);
        assert_eq!(most_negative.apply_discount(DiscountRate::from_bps(u32::MAX)), None);

        let largest = Money::from_cents(i64::MAX);
        assert_eq!(cents(largest.apply_discount(DiscountRate::from_bps(0))), Some(i64::MAX));
    }

    #[test]
    fn test_convert() {
        let price = Money::from_cents(1000);
        assert_eq!(cents(price.convert(ExchangeRate::from_micros(1_500_000))), Some(1500));

        // 333 * 0.5 = 166.5 → 167
        let odd = Money::from_cents(333);
        assert_eq!(cents(odd.convert(ExchangeRate::from_micros(500_000))), Some(167));
    }

    #[test]
    fn test_convert_out_of_range_is_none() {
        let large = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(large.convert(ExchangeRate::from_micros(3_000_000)), None);
        assert!(large.convert(ExchangeRate::from_micros(1_000_000)).is_some());

        let most_negative = Money::from_cents(i64::MIN);
        assert_eq!(most_negative.convert(ExchangeRate::from_micros(2_000_000)), None);
    }

    #[test]
    fn test_compact_string() {
        assert_eq!(Money::from_cents(1400).to_compact_string(), "$14");
        assert_eq!(Money::from_cents(1099).to_compact_string(), "$10.99");
        assert_eq!(Money::from_cents(1450).to_compact_string(), "$14.50");
        assert_eq!(Money::from_cents(-500).to_compact_string(), "-$5");
        assert_eq!(Money::zero().to_compact_string(), "$0");
    }

    #[test]
    fn test_ordering() {
        assert!(Money::from_cents(-1) < Money::zero());
        assert!(Money::from_cents(100) > Money::from_cents(99));
        assert!(Money::from_cents(-1).is_negative());
    }
}
