//! Authorization context for authenticated users

use crate::types::{ActorRole, AuthIdentity, UnknownRole};
use uuid::Uuid;

/// Represents an authenticated user context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    /// Identity of the authenticated user
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Interpret the stored role
    pub fn role(&self) -> Result<ActorRole, UnknownRole> {
        self.user.role.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_identity(role: &str) -> AuthIdentity {
        AuthIdentity {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_resolution() {
        let ctx = AuthContext::new(create_test_identity("employer"));
        assert_eq!(ctx.role(), Ok(ActorRole::Employer));

        let admin = AuthContext::new(create_test_identity("admin"));
        assert_eq!(admin.role(), Ok(ActorRole::Admin));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let ctx = AuthContext::new(create_test_identity("moderator"));
        assert_eq!(ctx.role(), Err(UnknownRole("moderator".to_string())));
    }

    #[test]
    fn test_user_id_matches_identity() {
        let identity = create_test_identity("candidate");
        let id = identity.id;
        assert_eq!(AuthContext::new(identity).user_id(), id);
    }
}
