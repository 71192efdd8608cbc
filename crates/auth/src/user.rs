//! Stored account record.

use chrono::{DateTime, Utc};

use storefront_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// A persisted account.
///
/// The password is only ever stored hashed; the record never carries the
/// plaintext. Emails are normalized (trimmed, lowercased) at construction so
/// uniqueness checks are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(
        email: &str,
        name: &str,
        password_hash: String,
        role: Role,
    ) -> DomainResult<Self> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id: UserId::new(),
            email,
            name: name.to_string(),
            password_hash,
            role,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let user = UserRecord::new("  Alice@Example.COM ", "Alice", "h".into(), Role::User).unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn invalid_email_rejected() {
        assert!(UserRecord::new("not-an-email", "Alice", "h".into(), Role::User).is_err());
        assert!(UserRecord::new("   ", "Alice", "h".into(), Role::User).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(UserRecord::new("a@b.com", "  ", "h".into(), Role::User).is_err());
    }
}
