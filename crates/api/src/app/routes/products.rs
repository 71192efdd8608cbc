use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};

use chrono::Utc;

use storefront_catalog::{ProductFilter, ProductRecord};
use storefront_core::{DiscountPercent, DomainError, Money, ProductId};
use storefront_pricing::{enrich, validate_discount_percentage};

use crate::app::dto::{CatalogQuery, CreateProductRequest, UpdateProductRequest};
use crate::app::errors::domain_error_to_response;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let filter = ProductFilter {
        query: query.q,
        category_slug: query.category,
    };

    let enriched: Vec<_> = services
        .store
        .list_products(&filter)
        .iter()
        .map(|p| enrich(p, &services.store.ratings_for_product(p.id)))
        .collect();

    (StatusCode::OK, Json(enriched)).into_response()
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let id = parse_product_id(&id)?;
    let product = services
        .store
        .get_product(id)
        .map_err(domain_error_to_response)?;
    let ratings = services.store.ratings_for_product(id);

    Ok((StatusCode::OK, Json(enrich(&product, &ratings))).into_response())
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(req): Json<CreateProductRequest>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    // Range-check the discount before any price math or storage.
    validate_discount_percentage(req.discount_percentage).map_err(domain_error_to_response)?;
    let price = Money::try_from_major_units(req.price).map_err(domain_error_to_response)?;
    validate_stock(req.stock).map_err(domain_error_to_response)?;
    validate_name(&req.name).map_err(domain_error_to_response)?;

    let now = Utc::now();
    let product = ProductRecord {
        id: ProductId::new(),
        name: req.name.trim().to_string(),
        description: req.description.unwrap_or_default(),
        price,
        discount_percentage: req.discount_percentage.map(DiscountPercent::from_percent),
        stock: req.stock,
        image_url: req.image_url,
        category_id: req.category_id,
        created_at: now,
        updated_at: now,
    };

    services
        .store
        .insert_product(product.clone())
        .map_err(domain_error_to_response)?;
    tracing::info!(product_id = %product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(enrich(&product, &[]))).into_response())
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    let id = parse_product_id(&id)?;
    let existing = services
        .store
        .get_product(id)
        .map_err(domain_error_to_response)?;

    // Absent field keeps the stored discount; explicit null clears it.
    let discount_percentage = match req.discount_percentage {
        None => existing.discount_percentage,
        Some(None) => None,
        Some(Some(pct)) => {
            validate_discount_percentage(Some(pct)).map_err(domain_error_to_response)?;
            Some(DiscountPercent::from_percent(pct))
        }
    };

    let price = Money::try_from_major_units(req.price).map_err(domain_error_to_response)?;
    validate_stock(req.stock).map_err(domain_error_to_response)?;
    validate_name(&req.name).map_err(domain_error_to_response)?;

    let product = ProductRecord {
        id,
        name: req.name.trim().to_string(),
        description: req.description.unwrap_or_default(),
        price,
        discount_percentage,
        stock: req.stock,
        image_url: req.image_url,
        category_id: req.category_id,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    services
        .store
        .update_product(product.clone())
        .map_err(domain_error_to_response)?;

    let ratings = services.store.ratings_for_product(id);
    Ok((StatusCode::OK, Json(enrich(&product, &ratings))).into_response())
}

async fn delete_one(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    let id = parse_product_id(&id)?;
    services
        .store
        .delete_product(id)
        .map_err(domain_error_to_response)?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

fn parse_product_id(raw: &str) -> Result<ProductId, Response> {
    raw.parse::<ProductId>().map_err(domain_error_to_response)
}

fn validate_stock(stock: i64) -> Result<(), DomainError> {
    if stock < 0 {
        return Err(DomainError::validation("stock must not be negative"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}
