//! The enriched product read shape.
//!
//! `enrich` is the only path from a stored product to a response body. It
//! reads exclusively from the raw stored fields, so applying it any number
//! of times yields the same derived values — a previously computed
//! `discounted_price` is never an input.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_catalog::{ProductRecord, RatingRecord};
use storefront_core::{CategoryId, ProductId};

use crate::{average_rating, discounted_price};

/// A product as served to clients: raw fields plus derived display fields.
///
/// All monetary fields are 2-decimal major-unit numbers; the internal cents
/// representation does not appear on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub discounted_price: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub average_rating: f64,
    pub total_ratings: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attach the derived display fields to a stored product.
pub fn enrich(product: &ProductRecord, ratings: &[RatingRecord]) -> EnrichedProduct {
    let values: Vec<i32> = ratings.iter().map(|r| r.value).collect();

    EnrichedProduct {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price.to_major_units(),
        discount_percentage: product.discount_percentage.map(|d| d.percent()),
        discounted_price: discounted_price(product.price, product.discount_percentage)
            .to_major_units(),
        stock: product.stock,
        image_url: product.image_url.clone(),
        category_id: product.category_id,
        average_rating: average_rating(&values),
        total_ratings: ratings.len(),
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}
