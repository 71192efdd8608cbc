use std::sync::Arc;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};

use chrono::Utc;

use storefront_catalog::CategoryRecord;
use storefront_core::{CategoryId, DomainError};

use crate::app::dto::{CreateCategoryRequest, category_to_json};
use crate::app::errors::domain_error_to_response;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", axum::routing::put(update).delete(delete_one))
}

async fn list(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let categories: Vec<_> = services
        .store
        .list_categories()
        .iter()
        .map(category_to_json)
        .collect();

    (StatusCode::OK, Json(categories)).into_response()
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(domain_error_to_response(DomainError::validation(
            "name cannot be empty",
        )));
    }
    let slug = req.slug.unwrap_or_else(|| slugify(&name));

    let category = CategoryRecord {
        id: CategoryId::new(),
        name,
        slug,
        created_at: Utc::now(),
    };
    services
        .store
        .insert_category(category.clone())
        .map_err(domain_error_to_response)?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "category created");

    Ok((StatusCode::CREATED, Json(category_to_json(&category))).into_response())
}

async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    let id = id.parse::<CategoryId>().map_err(domain_error_to_response)?;
    let existing = services
        .store
        .get_category(id)
        .map_err(domain_error_to_response)?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(domain_error_to_response(DomainError::validation(
            "name cannot be empty",
        )));
    }

    let category = CategoryRecord {
        id,
        slug: req.slug.unwrap_or_else(|| slugify(&name)),
        name,
        created_at: existing.created_at,
    };
    services
        .store
        .update_category(category.clone())
        .map_err(domain_error_to_response)?;

    Ok((StatusCode::OK, Json(category_to_json(&category))).into_response())
}

async fn delete_one(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    common::require_admin(&services, &headers)?;

    let id = id.parse::<CategoryId>().map_err(domain_error_to_response)?;
    services
        .store
        .delete_category(id)
        .map_err(domain_error_to_response)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Derive a URL slug from a display name ("Office Tools" -> "office-tools").
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
