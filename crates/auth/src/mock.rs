//! In-memory principal resolver
//!
//! Maps opaque bearer tokens to identities for tests and local runs.
//! Thread-safe via `Arc<Mutex<>>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::resolver::PrincipalResolver;
use crate::types::AuthIdentity;

/// Resolver backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticPrincipalResolver {
    principals: Arc<Mutex<HashMap<String, AuthIdentity>>>,
}

impl StaticPrincipalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh identity with `role` under `token`, returning its id.
    pub fn register(&self, token: &str, role: &str) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.register_identity(
            token,
            AuthIdentity {
                id,
                email: format!("{}@jobboard.test", id.simple()),
                name: None,
                role: role.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    /// Register an explicit identity under `token`.
    pub fn register_identity(&self, token: &str, identity: AuthIdentity) {
        self.principals
            .lock()
            .expect("principals lock poisoned")
            .insert(token.to_string(), identity);
    }
}

#[async_trait::async_trait]
impl PrincipalResolver for StaticPrincipalResolver {
    async fn resolve(&self, token: &str) -> Result<AuthContext, AuthError> {
        let principals = self.principals.lock().map_err(|e| {
            tracing::error!(error = %e, "principals lock poisoned");
            AuthError::UserLoadError
        })?;

        principals
            .get(token)
            .cloned()
            .map(AuthContext::new)
            .ok_or(AuthError::InvalidToken)
    }
}
