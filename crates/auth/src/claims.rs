use serde::{Deserialize, Serialize};

use storefront_core::UserId;

use crate::Role;

/// JWT claims model (transport-agnostic).
///
/// This is the identity a verified token yields: constructed fresh per
/// request, attached to the request context, never persisted. `iat`/`exp`
/// are unix-second timestamps as encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / account identifier.
    pub sub: UserId,

    /// Account email at issue time.
    pub email: String,

    /// Authorization tier granted to the token.
    pub role: Role,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiration (unix seconds).
    pub exp: i64,
}
