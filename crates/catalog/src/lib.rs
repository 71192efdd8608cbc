//! `storefront-catalog` — persisted record types and the storage seam.
//!
//! Records here are the raw stored shapes; derived display fields (discounted
//! price, average rating) are computed elsewhere and never written back.
//! `CatalogStore` is the trait boundary a durable backend would implement;
//! `MemoryCatalog` is the in-process implementation.

pub mod category;
pub mod order;
pub mod product;
pub mod rating;
pub mod store;

pub use category::CategoryRecord;
pub use order::{OrderItem, OrderRecord, OrderStatus};
pub use product::ProductRecord;
pub use rating::RatingRecord;
pub use store::{CatalogStore, MemoryCatalog, ProductFilter};
