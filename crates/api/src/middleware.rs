use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use storefront_auth::TokenVerifier;

use crate::app::errors;
use crate::context::Identity;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Gate 1 as a router layer: routes behind this always see an `Identity`
/// extension. Every rejection is the same 401, whichever sub-case failed.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = storefront_auth::authenticate(header, state.verifier.as_ref())
        .map_err(errors::auth_error_to_response)?;

    req.extensions_mut().insert(Identity::new(claims));

    Ok(next.run(req).await)
}
