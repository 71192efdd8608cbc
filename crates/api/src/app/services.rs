//! Service wiring: storage and token manager construction.

use std::sync::Arc;

use storefront_auth::{Hs256Tokens, Role, UserRecord, hash_password};
use storefront_catalog::{CatalogStore, MemoryCatalog};

use crate::config::ApiConfig;

pub struct AppServices {
    pub store: Arc<dyn CatalogStore>,
    pub tokens: Arc<Hs256Tokens>,
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());
    let tokens = Arc::new(Hs256Tokens::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_secs,
    ));

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        seed_admin(store.as_ref(), email, password);
    }

    AppServices { store, tokens }
}

/// Bootstrap the configured admin account. Failures are logged, not fatal:
/// the API is still serviceable for public reads without an admin.
fn seed_admin(store: &dyn CatalogStore, email: &str, password: &str) {
    let hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(error = %e, "failed to hash admin password; admin not seeded");
            return;
        }
    };

    let user = match UserRecord::new(email, "Administrator", hash, Role::Admin) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(error = %e, "invalid admin account config; admin not seeded");
            return;
        }
    };

    match store.insert_user(user) {
        Ok(()) => tracing::info!(email, "seeded admin account"),
        Err(e) => tracing::warn!(error = %e, "failed to seed admin account"),
    }
}
