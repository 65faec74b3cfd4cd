//! # Pricing Engine
//!
//! Pure line pricing and invoice aggregation. No side effects, no I/O.
//!
//! ## Rounding Policy
//! Tax is rounded half-up per line ([`Money::tax_at`]); invoice totals are
//! sums of the already-rounded line values. That ordering is what makes the
//! `invoice.total == Σ line.total` invariant hold exactly: the aggregate is
//! defined as the sum, never re-derived from the subtotal.

use crate::error::ValidationError;
use crate::money::{Money, TaxRate};

/// Result of pricing one line: `subtotal = unit_price × quantity`,
/// `tax = subtotal × rate`, `total = subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Field-wise sums over a set of priced lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Prices a single line.
///
/// Callers pre-validate, but the engine fails fast anyway: non-positive
/// quantity or negative price is a validation error, never a silent zero.
///
/// ## Example
/// ```rust
/// use mostrador_core::money::{Money, TaxRate};
/// use mostrador_core::pricing::price_line;
///
/// // 3 × $100.00 at 19% → $300.00 + $57.00 = $357.00
/// let line = price_line(Money::from_cents(10_000), TaxRate::from_percent(19), 3).unwrap();
/// assert_eq!(line.subtotal.cents(), 30_000);
/// assert_eq!(line.tax.cents(), 5_700);
/// assert_eq!(line.total.cents(), 35_700);
/// ```
pub fn price_line(
    unit_price: Money,
    tax_rate: TaxRate,
    quantity: i64,
) -> Result<PricedLine, ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if unit_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    let subtotal = unit_price.times(quantity);
    let tax = subtotal.tax_at(tax_rate);

    Ok(PricedLine {
        subtotal,
        tax,
        total: subtotal + tax,
    })
}

/// Aggregates priced lines into invoice totals.
pub fn aggregate(lines: &[PricedLine]) -> Totals {
    let mut totals = Totals::default();
    for line in lines {
        totals.subtotal += line.subtotal;
        totals.tax += line.tax;
        totals.total += line.total;
    }
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn prices_the_reference_scenario() {
        // Product at $100.00, 19% tax, quantity 3
        let line = price_line(cents(10_000), TaxRate::from_percent(19), 3).unwrap();
        assert_eq!(line.subtotal.cents(), 30_000);
        assert_eq!(line.tax.cents(), 5_700);
        assert_eq!(line.total.cents(), 35_700);
    }

    #[test]
    fn zero_tax_line() {
        let line = price_line(cents(250), TaxRate::zero(), 4).unwrap();
        assert_eq!(line.subtotal.cents(), 1_000);
        assert_eq!(line.tax.cents(), 0);
        assert_eq!(line.total.cents(), 1_000);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert!(price_line(cents(100), TaxRate::zero(), 0).is_err());
        assert!(price_line(cents(100), TaxRate::zero(), -2).is_err());
    }

    #[test]
    fn rejects_negative_price() {
        assert!(price_line(cents(-1), TaxRate::zero(), 1).is_err());
    }

    #[test]
    fn aggregate_sums_each_field() {
        let lines = vec![
            price_line(cents(10_000), TaxRate::from_percent(19), 3).unwrap(),
            price_line(cents(500), TaxRate::from_bps(825), 2).unwrap(),
        ];
        let totals = aggregate(&lines);

        assert_eq!(totals.subtotal, lines[0].subtotal + lines[1].subtotal);
        assert_eq!(totals.tax, lines[0].tax + lines[1].tax);
        assert_eq!(totals.total, lines[0].total + lines[1].total);
        // total is the sum of line totals, not subtotal+tax re-rounded
        assert_eq!(totals.total, totals.subtotal + totals.tax);
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let totals = aggregate(&[]);
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn many_lines_no_drift() {
        // 100 odd-priced lines: the invariant holds exactly by construction
        let lines: Vec<PricedLine> = (1..=100)
            .map(|i| price_line(cents(33 * i), TaxRate::from_bps(1900), 3).unwrap())
            .collect();
        let totals = aggregate(&lines);
        let sum_of_totals: Money = lines.iter().map(|l| l.total).sum();
        assert_eq!(totals.total, sum_of_totals);
    }
}
