use chrono::{DateTime, Utc};

use storefront_core::{ProductId, RatingId, UserId};

/// A single stored product rating.
///
/// The 1..=5 range is enforced at the request boundary; the stored value is
/// treated as opaque by the averaging math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingRecord {
    pub id: RatingId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub value: i32,
    pub created_at: DateTime<Utc>,
}
