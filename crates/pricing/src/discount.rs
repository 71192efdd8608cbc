//! Discount validation and application.
//!
//! Validation and computation are deliberately separate: write paths must
//! validate the raw percentage *before* it is ever stored or applied, while
//! the computation itself never errors.

use storefront_core::{DiscountPercent, DomainError, DomainResult, Money};

/// Validate a raw discount percentage from a write request.
///
/// Absent means "no discount" and is always valid. Present values must lie
/// in [0, 100]; both bounds are themselves valid (0 displays undiscounted,
/// 100 prices at 0.00).
pub fn validate_discount_percentage(value: Option<f64>) -> DomainResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(DomainError::validation(
            "discountPercentage must be between 0 and 100",
        ));
    }
    Ok(())
}

/// The price a buyer pays: stored price with the stored discount applied,
/// rounded half-up on the cent boundary.
///
/// Absent and non-positive discounts return the price unchanged, so even an
/// out-of-range negative value that slipped past validation cannot inflate
/// the price.
pub fn discounted_price(price: Money, discount: Option<DiscountPercent>) -> Money {
    match discount {
        Some(d) => price.with_discount(d),
        None => price,
    }
}
