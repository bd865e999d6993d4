//! Session user returned by the identity service.

use serde::{Deserialize, Serialize};

use super::Role;

/// The authenticated identity behind a storefront session.
///
/// Owned by the identity service; the storefront only keeps a copy for the
/// duration of a single page render. Unknown fields in the identity payload
/// are ignored. A missing `role` deserializes as [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name shown on the user menu trigger.
    pub full_name: String,
    /// Email address shown as the first user menu item.
    pub email: String,
    /// Role string, `"admin"` unlocks the admin navigation.
    #[serde(default)]
    pub role: Role,
}

impl SessionUser {
    /// Create a session user.
    #[must_use]
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            role,
        }
    }

    /// Whether this user sees the admin navigation.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_identity_payload() {
        let json = r#"{
            "id": "64f1c0",
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "admin",
            "created_date": "2024-01-01T00:00:00Z"
        }"#;

        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_admin());
    }

    #[test]
    fn test_missing_role_is_regular_user() {
        let json = r#"{"full_name": "Grace", "email": "grace@example.com"}"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let json = r#"{"full_name": "Grace", "role": "user"}"#;
        assert!(serde_json::from_str::<SessionUser>(json).is_err());
    }
}
