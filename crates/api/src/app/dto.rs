use serde::{Deserialize, Deserializer};

use storefront_auth::UserRecord;
use storefront_catalog::{CategoryRecord, OrderRecord};
use storefront_core::{CategoryId, ProductId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// Update request. `discount_percentage` is a double option so callers can
/// distinguish "leave as stored" (field absent) from "clear the discount"
/// (explicit null).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, deserialize_with = "present_field")]
    pub discount_percentage: Option<Option<f64>>,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// Wrap a present field (including an explicit `null`) in an outer `Some`,
/// so `#[serde(default)]` (outer `None`) only fires when the key is absent.
fn present_field<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub product_id: ProductId,
    pub rating: i32,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Public view of an account (never the password hash).
pub fn user_to_json(user: &UserRecord) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "email": user.email,
        "name": user.name,
        "role": user.role.as_str(),
        "createdAt": user.created_at,
    })
}

pub fn category_to_json(category: &CategoryRecord) -> serde_json::Value {
    serde_json::json!({
        "id": category.id.to_string(),
        "name": category.name,
        "slug": category.slug,
        "createdAt": category.created_at,
    })
}

pub fn order_to_json(order: &OrderRecord) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.to_string(),
        "userId": order.user_id.to_string(),
        "items": order.items.iter().map(|item| serde_json::json!({
            "productId": item.product_id.to_string(),
            "name": item.name,
            "quantity": item.quantity,
            "unitPrice": item.unit_price.to_major_units(),
            // Stored orders were overflow-checked at construction.
            "lineTotal": item.line_total().map_or(0.0, |m| m.to_major_units()),
        })).collect::<Vec<_>>(),
        "total": order.total.to_major_units(),
        "status": order.status.as_str(),
        "createdAt": order.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_discount_field_is_tristate() {
        let absent: UpdateProductRequest =
            serde_json::from_str(r#"{"name":"W","price":1.0,"stock":1}"#).unwrap();
        assert_eq!(absent.discount_percentage, None);

        let null: UpdateProductRequest =
            serde_json::from_str(r#"{"name":"W","price":1.0,"stock":1,"discountPercentage":null}"#)
                .unwrap();
        assert_eq!(null.discount_percentage, Some(None));

        let set: UpdateProductRequest =
            serde_json::from_str(r#"{"name":"W","price":1.0,"stock":1,"discountPercentage":25.0}"#)
                .unwrap();
        assert_eq!(set.discount_percentage, Some(Some(25.0)));
    }
}
