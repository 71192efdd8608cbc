//! Monetary amounts and discount percentages.
//!
//! Money is stored as integer cents so discount math never drifts the way
//! binary floats do. Rounding to the cent boundary is half-up and happens in
//! exactly one place (`Money::with_discount`). The integer representation is
//! internal: request/response mapping goes through the explicit
//! `try_from_major_units` / `to_major_units` bridge.

use core::fmt;

use crate::error::{DomainError, DomainResult};

/// A non-negative monetary amount in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a major-unit amount (e.g. `19.99`) into cents.
    ///
    /// Rejects negative and non-finite values; amounts are rounded to the
    /// nearest cent on the way in.
    pub fn try_from_major_units(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("price must not be negative"));
        }
        Ok(Money((value * 100.0).round() as i64))
    }

    /// Major-unit view for response mapping (two-decimal display value).
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Apply a percentage discount, rounding half-up on the cent boundary.
    ///
    /// Non-positive discounts leave the price unchanged, so an unvalidated
    /// negative percentage can never inflate a price. A discount of 100%
    /// yields zero, which is valid.
    pub fn with_discount(&self, discount: DiscountPercent) -> Money {
        let bps = discount.basis_points();
        if bps <= 0 {
            return *self;
        }
        if bps >= DiscountPercent::MAX_BPS {
            return Money::zero();
        }
        // i128 to keep the intermediate product overflow-free.
        let cents = (self.0 as i128 * (DiscountPercent::MAX_BPS - bps) as i128 + 5_000) / 10_000;
        Money(cents as i64)
    }

    /// Multiply by a quantity, `None` on `i64` overflow.
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Add another amount, `None` on `i64` overflow.
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

/// A discount percentage held as basis points (25.5% == 2550 bps).
///
/// Stored values are preserved exactly as written: a stored 0% is kept as 0%,
/// not coerced to "no discount" (display treats them the same).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscountPercent(i32);

impl DiscountPercent {
    pub const MAX_BPS: i32 = 10_000;

    /// Build from a percentage value, rounded to the nearest basis point.
    pub fn from_percent(pct: f64) -> Self {
        DiscountPercent((pct * 100.0).round() as i32)
    }

    #[inline]
    pub const fn from_basis_points(bps: i32) -> Self {
        DiscountPercent(bps)
    }

    #[inline]
    pub const fn basis_points(&self) -> i32 {
        self.0
    }

    /// Percentage view for response mapping.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// True when the discount actually reduces the price.
    #[inline]
    pub const fn is_effective(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_unit_bridge_round_trips_cents() {
        let m = Money::try_from_major_units(19.99).unwrap();
        assert_eq!(m.cents(), 1999);
        assert_eq!(m.to_major_units(), 19.99);
    }

    #[test]
    fn major_unit_parse_rejects_negative_and_nan() {
        assert!(Money::try_from_major_units(-0.01).is_err());
        assert!(Money::try_from_major_units(f64::NAN).is_err());
        assert!(Money::try_from_major_units(f64::INFINITY).is_err());
    }

    #[test]
    fn discount_rounds_half_up_on_the_cent() {
        // 10.99 at 50% = 5.495 -> 5.50
        let price = Money::from_cents(1099);
        let half = price.with_discount(DiscountPercent::from_percent(50.0));
        assert_eq!(half.cents(), 550);
    }

    #[test]
    fn discount_of_zero_or_negative_leaves_price_unchanged() {
        let price = Money::from_cents(1234);
        assert_eq!(price.with_discount(DiscountPercent::from_percent(0.0)), price);
        assert_eq!(price.with_discount(DiscountPercent::from_percent(-5.0)), price);
    }

    #[test]
    fn full_discount_yields_zero() {
        let price = Money::from_cents(9999);
        let free = price.with_discount(DiscountPercent::from_percent(100.0));
        assert!(free.is_zero());
    }

    #[test]
    fn quarter_off_exact() {
        let price = Money::from_cents(10_000);
        let sale = price.with_discount(DiscountPercent::from_percent(25.0));
        assert_eq!(sale.cents(), 7_500);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let price = Money::from_cents(2);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_cents(6)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);

        let near_max = Money::from_cents(i64::MAX - 1);
        assert_eq!(near_max.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(near_max.checked_add(Money::from_cents(2)), None);
    }

    #[test]
    fn display_is_two_decimal() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::zero().to_string(), "0.00");
    }
}
