//! `storefront-pricing` — display-price and rating math.
//!
//! Pure functions over stored records: discount application, discount-range
//! validation, rating averages, and the `enrich` composition that produces
//! the one read shape handlers are allowed to serve.

pub mod discount;
pub mod enrich;
pub mod rating;

pub use discount::{discounted_price, validate_discount_percentage};
pub use enrich::{EnrichedProduct, enrich};
pub use rating::average_rating;
