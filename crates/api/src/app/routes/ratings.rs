//! Rating routes. Mounted behind the auth layer.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};

use chrono::Utc;

use storefront_catalog::RatingRecord;
use storefront_core::{DomainError, RatingId};
use storefront_pricing::average_rating;

use crate::app::dto::CreateRatingRequest;
use crate::app::errors::domain_error_to_response;
use crate::app::services::AppServices;
use crate::context::Identity;

pub fn router() -> Router {
    Router::new().route("/", post(create))
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateRatingRequest>,
) -> Result<Response, Response> {
    if !(1..=5).contains(&req.rating) {
        return Err(domain_error_to_response(DomainError::validation(
            "rating must be between 1 and 5",
        )));
    }

    let rating = RatingRecord {
        id: RatingId::new(),
        product_id: req.product_id,
        user_id: identity.user_id(),
        value: req.rating,
        created_at: Utc::now(),
    };
    services
        .store
        .insert_rating(rating)
        .map_err(domain_error_to_response)?;

    let values: Vec<i32> = services
        .store
        .ratings_for_product(req.product_id)
        .iter()
        .map(|r| r.value)
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": rating.id.to_string(),
            "productId": rating.product_id.to_string(),
            "userId": rating.user_id.to_string(),
            "rating": rating.value,
            "averageRating": average_rating(&values),
            "totalRatings": values.len(),
        })),
    )
        .into_response())
}
