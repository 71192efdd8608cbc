//! Storage seam: the `CatalogStore` trait and the in-memory implementation.
//!
//! A durable backend would implement the same trait; handlers and tests only
//! ever see `Arc<dyn CatalogStore>`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use storefront_auth::UserRecord;
use storefront_core::{CategoryId, DomainError, DomainResult, OrderId, ProductId, UserId};

use crate::{CategoryRecord, OrderRecord, OrderStatus, ProductRecord, RatingRecord};

/// Catalog listing filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name or description.
    pub query: Option<String>,
    /// Restrict to products in the category with this slug.
    pub category_slug: Option<String>,
}

/// Storage boundary for all persisted records.
pub trait CatalogStore: Send + Sync {
    fn insert_product(&self, product: ProductRecord) -> DomainResult<()>;
    fn update_product(&self, product: ProductRecord) -> DomainResult<()>;
    fn delete_product(&self, id: ProductId) -> DomainResult<()>;
    fn get_product(&self, id: ProductId) -> DomainResult<ProductRecord>;
    /// Filtered listing, newest first.
    fn list_products(&self, filter: &ProductFilter) -> Vec<ProductRecord>;

    fn insert_category(&self, category: CategoryRecord) -> DomainResult<()>;
    fn update_category(&self, category: CategoryRecord) -> DomainResult<()>;
    fn delete_category(&self, id: CategoryId) -> DomainResult<()>;
    fn get_category(&self, id: CategoryId) -> DomainResult<CategoryRecord>;
    fn list_categories(&self) -> Vec<CategoryRecord>;

    fn insert_rating(&self, rating: RatingRecord) -> DomainResult<()>;
    fn ratings_for_product(&self, id: ProductId) -> Vec<RatingRecord>;

    /// Atomically check stock for every line, decrement it, and store the
    /// order. On any failure nothing is mutated.
    fn place_order(&self, order: OrderRecord) -> DomainResult<()>;
    fn get_order(&self, id: OrderId) -> DomainResult<OrderRecord>;
    fn list_orders(&self) -> Vec<OrderRecord>;
    fn orders_for_user(&self, user_id: UserId) -> Vec<OrderRecord>;
    fn set_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<OrderRecord>;

    fn insert_user(&self, user: UserRecord) -> DomainResult<()>;
    fn get_user(&self, id: UserId) -> DomainResult<UserRecord>;
    fn user_by_email(&self, email: &str) -> Option<UserRecord>;
}

#[derive(Default)]
struct Inner {
    products: HashMap<ProductId, ProductRecord>,
    categories: HashMap<CategoryId, CategoryRecord>,
    ratings: Vec<RatingRecord>,
    orders: HashMap<OrderId, OrderRecord>,
    users: HashMap<UserId, UserRecord>,
}

/// In-memory `CatalogStore` backed by a single `RwLock`.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("catalog lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("catalog lock poisoned")
    }
}

fn ensure_category_exists(inner: &Inner, id: Option<CategoryId>) -> DomainResult<()> {
    match id {
        Some(id) if !inner.categories.contains_key(&id) => {
            Err(DomainError::validation("unknown category"))
        }
        _ => Ok(()),
    }
}

impl CatalogStore for MemoryCatalog {
    fn insert_product(&self, product: ProductRecord) -> DomainResult<()> {
        let mut inner = self.write();
        ensure_category_exists(&inner, product.category_id)?;
        inner.products.insert(product.id, product);
        Ok(())
    }

    fn update_product(&self, product: ProductRecord) -> DomainResult<()> {
        let mut inner = self.write();
        if !inner.products.contains_key(&product.id) {
            return Err(DomainError::not_found());
        }
        ensure_category_exists(&inner, product.category_id)?;
        inner.products.insert(product.id, product);
        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        let mut inner = self.write();
        inner
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(DomainError::not_found)?;
        inner.ratings.retain(|r| r.product_id != id);
        Ok(())
    }

    fn get_product(&self, id: ProductId) -> DomainResult<ProductRecord> {
        self.read()
            .products
            .get(&id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    fn list_products(&self, filter: &ProductFilter) -> Vec<ProductRecord> {
        let inner = self.read();

        let category_id = match &filter.category_slug {
            Some(slug) => {
                match inner.categories.values().find(|c| &c.slug == slug) {
                    Some(c) => Some(c.id),
                    // Unknown slug filters everything out.
                    None => return Vec::new(),
                }
            }
            None => None,
        };

        let mut items: Vec<ProductRecord> = inner
            .products
            .values()
            .filter(|p| category_id.is_none() || p.category_id == category_id)
            .filter(|p| filter.query.as_deref().is_none_or(|q| p.matches_query(q)))
            .cloned()
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn insert_category(&self, category: CategoryRecord) -> DomainResult<()> {
        let mut inner = self.write();
        if inner.categories.values().any(|c| c.slug == category.slug) {
            return Err(DomainError::conflict(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }
        inner.categories.insert(category.id, category);
        Ok(())
    }

    fn update_category(&self, category: CategoryRecord) -> DomainResult<()> {
        let mut inner = self.write();
        if !inner.categories.contains_key(&category.id) {
            return Err(DomainError::not_found());
        }
        if inner
            .categories
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id)
        {
            return Err(DomainError::conflict(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }
        inner.categories.insert(category.id, category);
        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        let mut inner = self.write();
        inner
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(DomainError::not_found)?;
        // Orphaned products fall back to "uncategorized" rather than dangling.
        for product in inner.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    fn get_category(&self, id: CategoryId) -> DomainResult<CategoryRecord> {
        self.read()
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    fn list_categories(&self) -> Vec<CategoryRecord> {
        let mut items: Vec<CategoryRecord> = self.read().categories.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    fn insert_rating(&self, rating: RatingRecord) -> DomainResult<()> {
        let mut inner = self.write();
        if !inner.products.contains_key(&rating.product_id) {
            return Err(DomainError::not_found());
        }
        inner.ratings.push(rating);
        Ok(())
    }

    fn ratings_for_product(&self, id: ProductId) -> Vec<RatingRecord> {
        self.read()
            .ratings
            .iter()
            .filter(|r| r.product_id == id)
            .copied()
            .collect()
    }

    fn place_order(&self, order: OrderRecord) -> DomainResult<()> {
        let mut inner = self.write();

        // Validate every line before touching any stock.
        for item in &order.items {
            let product = inner
                .products
                .get(&item.product_id)
                .ok_or_else(DomainError::not_found)?;
            if product.stock < item.quantity {
                return Err(DomainError::validation(format!(
                    "insufficient stock for '{}'",
                    product.name
                )));
            }
        }

        for item in &order.items {
            if let Some(product) = inner.products.get_mut(&item.product_id) {
                product.stock -= item.quantity;
            }
        }

        inner.orders.insert(order.id, order);
        Ok(())
    }

    fn get_order(&self, id: OrderId) -> DomainResult<OrderRecord> {
        self.read()
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    fn list_orders(&self) -> Vec<OrderRecord> {
        let mut items: Vec<OrderRecord> = self.read().orders.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn orders_for_user(&self, user_id: UserId) -> Vec<OrderRecord> {
        let mut items: Vec<OrderRecord> = self
            .read()
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn set_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<OrderRecord> {
        let mut inner = self.write();
        let order = inner.orders.get_mut(&id).ok_or_else(DomainError::not_found)?;
        order.status = status;
        Ok(order.clone())
    }

    fn insert_user(&self, user: UserRecord) -> DomainResult<()> {
        let mut inner = self.write();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email already registered"));
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    fn get_user(&self, id: UserId) -> DomainResult<UserRecord> {
        self.read()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(DomainError::not_found)
    }

    fn user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.read().users.values().find(|u| u.email == email).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrderItem;
    use chrono::Utc;
    use storefront_auth::Role;
    use storefront_core::Money;

    fn product(name: &str, price_cents: i64, stock: i64) -> ProductRecord {
        let now = Utc::now();
        ProductRecord {
            id: ProductId::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Money::from_cents(price_cents),
            discount_percentage: None,
            stock,
            image_url: None,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn category(name: &str, slug: &str) -> CategoryRecord {
        CategoryRecord {
            id: CategoryId::new(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn product_crud_round_trip() {
        let store = MemoryCatalog::new();
        let p = product("Widget", 1099, 5);
        let id = p.id;

        store.insert_product(p.clone()).unwrap();
        assert_eq!(store.get_product(id).unwrap(), p);

        let mut updated = p.clone();
        updated.stock = 7;
        store.update_product(updated).unwrap();
        assert_eq!(store.get_product(id).unwrap().stock, 7);

        store.delete_product(id).unwrap();
        assert_eq!(store.get_product(id), Err(DomainError::NotFound));
    }

    #[test]
    fn update_missing_product_is_not_found() {
        let store = MemoryCatalog::new();
        assert_eq!(
            store.update_product(product("Ghost", 100, 1)),
            Err(DomainError::NotFound)
        );
    }

    #[test]
    fn product_with_unknown_category_rejected() {
        let store = MemoryCatalog::new();
        let mut p = product("Widget", 1099, 5);
        p.category_id = Some(CategoryId::new());
        assert!(matches!(
            store.insert_product(p),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn listing_filters_by_query_and_slug() {
        let store = MemoryCatalog::new();
        let tools = category("Tools", "tools");
        store.insert_category(tools.clone()).unwrap();

        let mut hammer = product("Hammer", 1500, 3);
        hammer.category_id = Some(tools.id);
        store.insert_product(hammer).unwrap();
        store.insert_product(product("Teapot", 900, 1)).unwrap();

        let all = store.list_products(&ProductFilter::default());
        assert_eq!(all.len(), 2);

        let by_slug = store.list_products(&ProductFilter {
            category_slug: Some("tools".into()),
            ..Default::default()
        });
        assert_eq!(by_slug.len(), 1);
        assert_eq!(by_slug[0].name, "Hammer");

        let by_query = store.list_products(&ProductFilter {
            query: Some("TEAP".into()),
            ..Default::default()
        });
        assert_eq!(by_query.len(), 1);
        assert_eq!(by_query[0].name, "Teapot");

        let unknown_slug = store.list_products(&ProductFilter {
            category_slug: Some("nope".into()),
            ..Default::default()
        });
        assert!(unknown_slug.is_empty());
    }

    #[test]
    fn listing_is_newest_first() {
        let store = MemoryCatalog::new();

        let mut oldest = product("Oldest", 100, 1);
        oldest.created_at = Utc::now() - chrono::Duration::minutes(10);
        let mut middle = product("Middle", 100, 1);
        middle.created_at = Utc::now() - chrono::Duration::minutes(5);
        let newest = product("Newest", 100, 1);

        // Insertion order must not matter.
        store.insert_product(middle).unwrap();
        store.insert_product(newest).unwrap();
        store.insert_product(oldest).unwrap();

        let names: Vec<_> = store
            .list_products(&ProductFilter::default())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn duplicate_category_slug_conflicts() {
        let store = MemoryCatalog::new();
        store.insert_category(category("Tools", "tools")).unwrap();
        assert!(matches!(
            store.insert_category(category("Other Tools", "tools")),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn deleting_category_uncategorizes_products() {
        let store = MemoryCatalog::new();
        let tools = category("Tools", "tools");
        store.insert_category(tools.clone()).unwrap();

        let mut p = product("Hammer", 1500, 3);
        p.category_id = Some(tools.id);
        let pid = p.id;
        store.insert_product(p).unwrap();

        store.delete_category(tools.id).unwrap();
        assert_eq!(store.get_product(pid).unwrap().category_id, None);
    }

    #[test]
    fn rating_requires_existing_product() {
        let store = MemoryCatalog::new();
        let r = RatingRecord {
            id: storefront_core::RatingId::new(),
            product_id: ProductId::new(),
            user_id: UserId::new(),
            value: 4,
            created_at: Utc::now(),
        };
        assert_eq!(store.insert_rating(r), Err(DomainError::NotFound));
    }

    #[test]
    fn place_order_decrements_stock() {
        let store = MemoryCatalog::new();
        let p = product("Widget", 1000, 10);
        let pid = p.id;
        store.insert_product(p).unwrap();

        let order = OrderRecord::new(
            UserId::new(),
            vec![OrderItem {
                product_id: pid,
                name: "Widget".into(),
                quantity: 4,
                unit_price: Money::from_cents(1000),
            }],
        )
        .unwrap();
        store.place_order(order.clone()).unwrap();

        assert_eq!(store.get_product(pid).unwrap().stock, 6);
        assert_eq!(store.get_order(order.id).unwrap().total.cents(), 4000);
    }

    #[test]
    fn failed_order_leaves_stock_untouched() {
        let store = MemoryCatalog::new();
        let in_stock = product("Widget", 1000, 10);
        let scarce = product("Gadget", 2000, 1);
        let (wid, gid) = (in_stock.id, scarce.id);
        store.insert_product(in_stock).unwrap();
        store.insert_product(scarce).unwrap();

        let order = OrderRecord::new(
            UserId::new(),
            vec![
                OrderItem {
                    product_id: wid,
                    name: "Widget".into(),
                    quantity: 4,
                    unit_price: Money::from_cents(1000),
                },
                OrderItem {
                    product_id: gid,
                    name: "Gadget".into(),
                    quantity: 2,
                    unit_price: Money::from_cents(2000),
                },
            ],
        )
        .unwrap();

        assert!(matches!(store.place_order(order), Err(DomainError::Validation(_))));
        // First line must not have been applied.
        assert_eq!(store.get_product(wid).unwrap().stock, 10);
        assert_eq!(store.get_product(gid).unwrap().stock, 1);
    }

    #[test]
    fn orders_scoped_per_user() {
        let store = MemoryCatalog::new();
        let p = product("Widget", 1000, 100);
        let pid = p.id;
        store.insert_product(p).unwrap();

        let (alice, bob) = (UserId::new(), UserId::new());
        let item = |qty| OrderItem {
            product_id: pid,
            name: "Widget".into(),
            quantity: qty,
            unit_price: Money::from_cents(1000),
        };
        store.place_order(OrderRecord::new(alice, vec![item(1)]).unwrap()).unwrap();
        store.place_order(OrderRecord::new(alice, vec![item(2)]).unwrap()).unwrap();
        store.place_order(OrderRecord::new(bob, vec![item(3)]).unwrap()).unwrap();

        assert_eq!(store.orders_for_user(alice).len(), 2);
        assert_eq!(store.orders_for_user(bob).len(), 1);
        assert_eq!(store.list_orders().len(), 3);
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = MemoryCatalog::new();
        let user =
            UserRecord::new("alice@example.com", "Alice", "hash".into(), Role::User).unwrap();
        store.insert_user(user).unwrap();

        let dup =
            UserRecord::new("Alice@Example.com", "Alice 2", "hash".into(), Role::User).unwrap();
        assert!(matches!(store.insert_user(dup), Err(DomainError::Conflict(_))));
    }
}
