//! Session domain model.
//!
//! The session is the authenticated identity and role claim currently
//! active in the client. It is established and refreshed by an external
//! identity provider; the core only reads it and reacts to transitions.

use serde::{Deserialize, Serialize};

/// Access role attached to an authenticated identity.
///
/// Resolved once per session from the role claim in the identity's
/// attached metadata. Unknown or absent claims degrade to `User`
/// (least privilege) rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May see admin-only surfaces (document upload).
    Admin,
    /// Regular user, chat only.
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    /// Resolves a role claim string into a typed role.
    ///
    /// Absent or unrecognized claims resolve to `Role::User`. This never
    /// fails and never escalates: only an exact `"admin"` claim grants
    /// admin privilege.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some("admin") => Role::Admin,
            _ => Role::User,
        }
    }

    /// Returns the claim string for this role.
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// The authenticated identity currently active in the client.
///
/// Created when the identity provider establishes a session, cleared on
/// sign-out or token expiry. The core never mutates a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier, used to attribute persisted records.
    pub user_id: String,
    /// The user's email address, for display.
    pub email: String,
    /// Resolved role claim.
    pub role: Role,
}

impl Session {
    /// Creates a session with an already-resolved role.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
        }
    }

    /// True when this session carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_claim_defaults_to_user() {
        assert_eq!(Role::from_claim(None), Role::User);
        assert_eq!(Role::from_claim(Some("user")), Role::User);
        assert_eq!(Role::from_claim(Some("superuser")), Role::User);
        assert_eq!(Role::from_claim(Some("")), Role::User);
        assert_eq!(Role::from_claim(Some("Admin")), Role::User);
    }

    #[test]
    fn test_role_claim_admin() {
        assert_eq!(Role::from_claim(Some("admin")), Role::Admin);
    }
}
