//! Session user role.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to a session user by the identity service.
///
/// The identity service sends roles as plain strings. `"admin"` and `"user"`
/// are recognised; anything else is preserved verbatim in [`Role::Other`].
/// Matching is case-sensitive, so `"Admin"` is not an administrator.
///
/// ```
/// use luxstore_core::Role;
///
/// assert_eq!(Role::from("admin"), Role::Admin);
/// assert_eq!(Role::from("Admin"), Role::Other("Admin".to_string()));
/// assert_eq!(Role::from("editor").as_str(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Store administrator, sees the management navigation.
    Admin,
    /// Regular shopper.
    #[default]
    User,
    /// Any role string the storefront does not know about.
    Other(String),
}

impl Role {
    /// Wire value for [`Role::Admin`].
    pub const ADMIN: &'static str = "admin";
    /// Wire value for [`Role::User`].
    pub const USER: &'static str = "user";

    /// Returns the role as the identity service spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => Self::ADMIN,
            Self::User => Self::USER,
            Self::Other(role) => role,
        }
    }

    /// Whether this role unlocks the admin navigation.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            Self::ADMIN => Self::Admin,
            Self::USER => Self::User,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ADMIN => Self::Admin,
            Self::USER => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
    }

    #[test]
    fn test_role_matching_is_case_sensitive() {
        let role = Role::from("ADMIN");
        assert!(!role.is_admin());
        assert_eq!(role, Role::Other("ADMIN".to_string()));
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
        assert!(!Role::Other("superuser".to_string()).is_admin());
        assert!(!Role::Other(String::new()).is_admin());
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);

        let role: Role = serde_json::from_str("\"support\"").unwrap();
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"support\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Other("staff".to_string()).to_string(), "staff");
    }
}
