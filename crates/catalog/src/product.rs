use chrono::{DateTime, Utc};

use storefront_core::{CategoryId, DiscountPercent, Money, ProductId};

/// A stored catalog product.
///
/// `discount_percentage` is preserved exactly as written: a stored 0% is not
/// coerced to `None`. Display math happens downstream, off these raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub discount_percentage: Option<DiscountPercent>,
    pub stock: i64,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Case-insensitive substring match on name or description.
    pub fn matches_query(&self, q: &str) -> bool {
        let q = q.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }
}
