//! `storefront-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The two gates
//! (`authenticate`, `authorize_admin`) are pure over a `TokenVerifier`; the
//! HS256 implementation and password hashing live here so callers never touch
//! key material directly.

pub mod claims;
pub mod gate;
pub mod password;
pub mod role;
pub mod token;
pub mod user;

pub use claims::Claims;
pub use gate::{AuthError, authenticate, authorize_admin};
pub use password::{hash_password, verify_password};
pub use role::Role;
pub use token::{Hs256Tokens, TokenError, TokenVerifier};
pub use user::UserRecord;
