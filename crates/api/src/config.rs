//! Process configuration, loaded once at startup.
//!
//! The signing secret lives here and is handed to the auth layer during
//! wiring; nothing reads it from the environment per request.

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address for the HTTP server.
    pub bind_addr: String,

    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,

    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,

    /// Optional admin account seeded at startup (both must be set).
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables with dev defaults.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret,
            token_ttl_secs,
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Minimal config for tests and embedded use.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            admin_email: None,
            admin_password: None,
        }
    }
}
