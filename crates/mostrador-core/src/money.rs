//! # Money Module
//!
//! Monetary values and tax rates for Mostrador.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                 │
//! │                                                             │
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004        │
//! │                                                             │
//! │  OUR SOLUTION: integer cents.                               │
//! │  35700 cents is $357.00, exactly, every time, and sums      │
//! │  over thousands of invoice lines never drift.               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every monetary value in the system (product prices, line totals,
//! invoice totals, daily summaries) flows through [`Money`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent through the inner integer**: the wire format is a
///   plain number of cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity to get a line subtotal.
    #[inline]
    pub const fn times(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }

    /// Tax amount for this value at the given rate, rounded half-up.
    ///
    /// Integer math throughout: `(cents * bps + 5000) / 10000`, computed in
    /// i128 so large subtotals cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::{Money, TaxRate};
    ///
    /// let subtotal = Money::from_cents(30_000);  // $300.00
    /// let iva = TaxRate::from_bps(1900);         // 19%
    /// assert_eq!(subtotal.tax_at(iva).cents(), 5_700);
    /// ```
    pub fn tax_at(&self, rate: TaxRate) -> Money {
        let tax = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money(tax as i64)
    }
}

/// Debug-friendly display; the frontend owns real currency formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
///
/// 1900 bps = 19% VAT. Basis points keep the rate an integer, so tax math
/// stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole-number percentage (19 → 19%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display only.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_round_trip() {
        let m = Money::from_cents(1099);
        assert_eq!(m.cents(), 1099);
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.times(3).cents(), 3000);
    }

    #[test]
    fn sum_over_iterator() {
        let lines = [Money::from_cents(100), Money::from_cents(250), Money::from_cents(7)];
        let total: Money = lines.iter().copied().sum();
        assert_eq!(total.cents(), 357);
    }

    #[test]
    fn tax_exact() {
        // $300.00 at 19% = $57.00, no rounding involved
        let subtotal = Money::from_cents(30_000);
        assert_eq!(subtotal.tax_at(TaxRate::from_percent(19)).cents(), 5_700);
    }

    #[test]
    fn tax_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → 83 cents
        let amount = Money::from_cents(1000);
        assert_eq!(amount.tax_at(TaxRate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn tax_zero_rate() {
        assert_eq!(Money::from_cents(9999).tax_at(TaxRate::zero()).cents(), 0);
    }

    #[test]
    fn tax_rate_from_percent() {
        assert_eq!(TaxRate::from_percent(19).bps(), 1900);
        assert!((TaxRate::from_bps(825).percent() - 8.25).abs() < 1e-9);
    }
}
