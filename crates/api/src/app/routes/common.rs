//! Handler-level gate helpers for resources with a mixed public/admin
//! surface (catalog reads are open, writes are admin-only).

use axum::http::HeaderMap;
use axum::response::Response;

use storefront_auth::{authenticate, authorize_admin};

use crate::app::{errors, services::AppServices};
use crate::context::Identity;

pub fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Gate 1 inside a handler.
pub fn require_auth(services: &AppServices, headers: &HeaderMap) -> Result<Identity, Response> {
    let claims = authenticate(bearer_header(headers), services.tokens.as_ref())
        .map_err(errors::auth_error_to_response)?;
    Ok(Identity::new(claims))
}

/// Gate 1 then Gate 2 inside a handler (admin-only writes).
pub fn require_admin(services: &AppServices, headers: &HeaderMap) -> Result<Identity, Response> {
    let identity = require_auth(services, headers)?;
    authorize_admin(identity.claims()).map_err(errors::auth_error_to_response)?;
    Ok(identity)
}
