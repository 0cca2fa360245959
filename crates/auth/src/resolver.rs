//! Principal resolution capability

use std::sync::Arc;

use crate::context::AuthContext;
use crate::error::AuthError;

/// Turns a bearer credential into an authenticated principal.
///
/// The production implementation is [`crate::AuthBackend`]; tests use
/// [`crate::mock::StaticPrincipalResolver`].
#[async_trait::async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// Resolve the principal owning `token`, or fail with an [`AuthError`].
    async fn resolve(&self, token: &str) -> Result<AuthContext, AuthError>;
}

/// Shared handle stored in domain states and pulled out by the extractors
pub type SharedPrincipalResolver = Arc<dyn PrincipalResolver>;
