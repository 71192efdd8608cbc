use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use storefront_auth::{Role, UserRecord, hash_password, verify_password};

use crate::app::dto::{LoginRequest, RegisterRequest, user_to_json};
use crate::app::errors::{domain_error_to_response, json_error};
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

const MIN_PASSWORD_LEN: usize = 6;

async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, Response> {
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "registration failed",
        )
    })?;

    let user = UserRecord::new(&req.email, &req.name, hash, Role::User)
        .map_err(domain_error_to_response)?;
    services
        .store
        .insert_user(user.clone())
        .map_err(domain_error_to_response)?;

    let token = issue_token(&services, &user)?;
    tracing::info!(email = %user.email, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "token": token, "user": user_to_json(&user) })),
    )
        .into_response())
}

async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, Response> {
    let email = req.email.trim().to_lowercase();

    // Unknown account and wrong password produce the same response.
    let user = services
        .store
        .user_by_email(&email)
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .ok_or_else(|| {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials")
        })?;

    let token = issue_token(&services, &user)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "token": token, "user": user_to_json(&user) })),
    )
        .into_response())
}

async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let identity = common::require_auth(&services, &headers)?;
    let user = services
        .store
        .get_user(identity.user_id())
        .map_err(domain_error_to_response)?;

    Ok((StatusCode::OK, Json(user_to_json(&user))).into_response())
}

fn issue_token(services: &AppServices, user: &UserRecord) -> Result<String, Response> {
    services
        .tokens
        .issue(user.id, &user.email, user.role)
        .map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "could not issue token",
            )
        })
}
