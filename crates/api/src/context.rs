use storefront_auth::{Claims, Role};
use storefront_core::UserId;

/// Authenticated identity for a request.
///
/// Constructed from verified claims after Gate 1, attached as a request
/// extension, discarded when the request ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    claims: Claims,
}

impl Identity {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> UserId {
        self.claims.sub
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}
