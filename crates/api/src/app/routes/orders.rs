//! Order routes. The whole router mounts behind the auth layer, so every
//! handler can rely on an `Identity` extension being present.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};

use storefront_auth::authorize_admin;
use storefront_catalog::{OrderItem, OrderRecord, OrderStatus};
use storefront_core::{DomainError, OrderId};
use storefront_pricing::discounted_price;

use crate::app::dto::{CreateOrderRequest, UpdateOrderStatusRequest, order_to_json};
use crate::app::errors::{auth_error_to_response, domain_error_to_response};
use crate::app::services::AppServices;
use crate::context::Identity;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one))
        .route("/:id/status", put(set_status))
}

async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Response, Response> {
    if req.items.is_empty() {
        return Err(domain_error_to_response(DomainError::validation(
            "order must contain at least one item",
        )));
    }

    // Each line is priced at the product's current discounted price; later
    // catalog edits never reprice a placed order.
    let mut items = Vec::with_capacity(req.items.len());
    for line in &req.items {
        if line.quantity <= 0 {
            return Err(domain_error_to_response(DomainError::validation(
                "quantity must be positive",
            )));
        }
        let product = services
            .store
            .get_product(line.product_id)
            .map_err(domain_error_to_response)?;
        items.push(OrderItem {
            product_id: product.id,
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price: discounted_price(product.price, product.discount_percentage),
        });
    }

    let order = OrderRecord::new(identity.user_id(), items).map_err(domain_error_to_response)?;
    services
        .store
        .place_order(order.clone())
        .map_err(domain_error_to_response)?;
    tracing::info!(order_id = %order.id, user_id = %order.user_id, "order placed");

    Ok((StatusCode::CREATED, Json(order_to_json(&order))).into_response())
}

async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Response {
    let orders = if identity.role().is_admin() {
        services.store.list_orders()
    } else {
        services.store.orders_for_user(identity.user_id())
    };
    let body: Vec<_> = orders.iter().map(order_to_json).collect();

    (StatusCode::OK, Json(body)).into_response()
}

async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let id = id.parse::<OrderId>().map_err(domain_error_to_response)?;
    let order = services
        .store
        .get_order(id)
        .map_err(domain_error_to_response)?;

    // Another user's order reads as missing, not as forbidden.
    if order.user_id != identity.user_id() && !identity.role().is_admin() {
        return Err(domain_error_to_response(DomainError::not_found()));
    }

    Ok((StatusCode::OK, Json(order_to_json(&order))).into_response())
}

async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Response, Response> {
    authorize_admin(identity.claims()).map_err(auth_error_to_response)?;

    let id = id.parse::<OrderId>().map_err(domain_error_to_response)?;
    let status = req
        .status
        .parse::<OrderStatus>()
        .map_err(domain_error_to_response)?;
    let order = services
        .store
        .set_order_status(id, status)
        .map_err(domain_error_to_response)?;
    tracing::info!(order_id = %order.id, status = %order.status, "order status updated");

    Ok((StatusCode::OK, Json(order_to_json(&order))).into_response())
}
