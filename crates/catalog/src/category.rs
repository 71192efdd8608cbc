use chrono::{DateTime, Utc};

use storefront_core::CategoryId;

/// A stored category. Slugs are unique and used for catalog filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}
