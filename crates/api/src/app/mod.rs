//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: storage/token wiring
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig) -> Router {
    let services = Arc::new(services::build_services(&config));
    let auth_state = middleware::AuthState {
        verifier: services.tokens.clone(),
    };

    // Orders and ratings are authenticated end to end; gate them at the
    // router layer. Product/category writes gate inside their handlers
    // (mixed public/admin surface on the same resource paths).
    let session_scoped = Router::new()
        .nest("/api/orders", routes::orders::router())
        .nest("/api/ratings", routes::ratings::router())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/products", routes::products::router())
        .nest("/api/categories", routes::categories::router())
        .merge(session_scoped)
        .layer(Extension(services))
}
