//! Signed-token issue/verify behind a narrow trait.
//!
//! The gates in [`crate::gate`] do no cryptography themselves; they sequence
//! outcomes over whatever `TokenVerifier` is wired in. `Hs256Tokens` is the
//! production implementation, built once at startup from the configured
//! signing secret and never mutated afterwards.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use thiserror::Error;

use storefront_core::UserId;

use crate::{Claims, Role};

/// Verify an opaque bearer token into claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Token-level failure.
///
/// The distinction between variants is internal (tests, logs); the gates
/// collapse every variant to the same unauthorized outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,

    #[error("token could not be signed")]
    Signing,
}

/// HS256 token manager: issues and verifies tokens with a shared secret.
pub struct Hs256Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl Hs256Tokens {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue a token for an authenticated account.
    pub fn issue(&self, user_id: UserId, email: &str, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            TokenError::Signing
        })
    }
}

impl TokenVerifier for Hs256Tokens {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No grace window: an expired token is expired.
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(secret: &str) -> Hs256Tokens {
        Hs256Tokens::new(secret.as_bytes(), 600)
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let tokens = manager("test-secret");
        let user_id = UserId::new();

        let token = tokens.issue(user_id, "alice@example.com", Role::Admin).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = Hs256Tokens::new(b"test-secret", -600);
        let token = tokens.issue(UserId::new(), "bob@example.com", Role::User).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = manager("secret-a")
            .issue(UserId::new(), "carol@example.com", Role::User)
            .unwrap();

        assert_eq!(manager("secret-b").verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(manager("test-secret").verify("not-a-jwt"), Err(TokenError::Invalid));
    }
}
