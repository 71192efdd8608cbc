//! The two request gates.
//!
//! Gate 1 (`authenticate`) turns the raw `Authorization` header into claims.
//! Gate 2 (`authorize_admin`) is a pure predicate over claims Gate 1 already
//! produced; it must only ever be composed after Gate 1.

use thiserror::Error;

use crate::{Claims, TokenVerifier};

/// Gate outcome errors, mapped 1:1 to HTTP 401/403 by the transport layer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Gate 1 failure. Deliberately carries no detail: missing, malformed,
    /// and invalid credentials all look identical to the caller.
    #[error("unauthorized")]
    Unauthorized,

    /// Gate 2 failure: authenticated, but not an admin.
    #[error("forbidden")]
    Forbidden,
}

/// Internal sub-cases of a rejected `Authorization` header.
///
/// Never exposed: callers only ever see `AuthError::Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BearerDefect {
    MissingHeader,
    MalformedHeader,
    EmptyToken,
}

fn extract_bearer(header: Option<&str>) -> Result<&str, BearerDefect> {
    let header = header.ok_or(BearerDefect::MissingHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(BearerDefect::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(BearerDefect::EmptyToken);
    }

    Ok(token)
}

/// Gate 1: authenticate a request from its raw `Authorization` header value.
///
/// Verification is only attempted for a well-formed `Bearer <token>` header;
/// a missing or malformed header short-circuits without touching the
/// verifier. Every failure path yields the same `Unauthorized` value.
pub fn authenticate(
    header: Option<&str>,
    verifier: &dyn TokenVerifier,
) -> Result<Claims, AuthError> {
    let token = extract_bearer(header).map_err(|_| AuthError::Unauthorized)?;

    verifier.verify(token).map_err(|_| AuthError::Unauthorized)
}

/// Gate 2: admit only admin-tier claims.
pub fn authorize_admin(claims: &Claims) -> Result<(), AuthError> {
    if claims.role.is_admin() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, TokenError};
    use storefront_core::UserId;

    /// Stub verifier: accepts exactly one token string.
    struct FixedVerifier {
        accepted: &'static str,
        claims: Claims,
        failure: TokenError,
    }

    impl TokenVerifier for FixedVerifier {
        fn verify(&self, token: &str) -> Result<Claims, TokenError> {
            if token == self.accepted {
                Ok(self.claims.clone())
            } else {
                Err(self.failure.clone())
            }
        }
    }

    fn claims(role: Role) -> Claims {
        Claims {
            sub: UserId::new(),
            email: "test@example.com".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn verifier() -> FixedVerifier {
        FixedVerifier {
            accepted: "good-token",
            claims: claims(Role::User),
            failure: TokenError::Invalid,
        }
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_eq!(authenticate(None, &verifier()), Err(AuthError::Unauthorized));
    }

    #[test]
    fn non_bearer_header_is_unauthorized() {
        let v = verifier();
        assert_eq!(authenticate(Some("Basic abc"), &v), Err(AuthError::Unauthorized));
        assert_eq!(authenticate(Some("good-token"), &v), Err(AuthError::Unauthorized));
    }

    #[test]
    fn empty_bearer_token_is_unauthorized() {
        assert_eq!(authenticate(Some("Bearer "), &verifier()), Err(AuthError::Unauthorized));
        assert_eq!(authenticate(Some("Bearer    "), &verifier()), Err(AuthError::Unauthorized));
    }

    #[test]
    fn rejected_token_is_unauthorized() {
        assert_eq!(
            authenticate(Some("Bearer wrong-token"), &verifier()),
            Err(AuthError::Unauthorized)
        );
    }

    #[test]
    fn expired_token_maps_to_same_unauthorized_as_invalid() {
        let expired = FixedVerifier {
            accepted: "good-token",
            claims: claims(Role::User),
            failure: TokenError::Expired,
        };
        // Expired vs invalid vs missing must be indistinguishable outward.
        assert_eq!(
            authenticate(Some("Bearer stale"), &expired),
            Err(AuthError::Unauthorized)
        );
    }

    #[test]
    fn well_formed_header_with_valid_token_authenticates() {
        let v = verifier();
        let got = authenticate(Some("Bearer good-token"), &v).unwrap();
        assert_eq!(got.email, "test@example.com");
        assert_eq!(got.role, Role::User);
    }

    #[test]
    fn malformed_header_never_reaches_the_verifier() {
        struct PanicVerifier;
        impl TokenVerifier for PanicVerifier {
            fn verify(&self, _: &str) -> Result<Claims, TokenError> {
                panic!("verifier must not be called for malformed headers");
            }
        }

        assert_eq!(authenticate(None, &PanicVerifier), Err(AuthError::Unauthorized));
        assert_eq!(authenticate(Some("Token x"), &PanicVerifier), Err(AuthError::Unauthorized));
        assert_eq!(authenticate(Some("Bearer "), &PanicVerifier), Err(AuthError::Unauthorized));
    }

    #[test]
    fn admin_gate_rejects_user_tier() {
        assert_eq!(authorize_admin(&claims(Role::User)), Err(AuthError::Forbidden));
    }

    #[test]
    fn admin_gate_admits_admin_tier() {
        assert_eq!(authorize_admin(&claims(Role::Admin)), Ok(()));
    }
}
