//! Axum extractors for authentication
//!
//! Generic over any state `S` where `SharedPrincipalResolver: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::resolver::SharedPrincipalResolver;

/// Authenticated user extractor (bearer JWT)
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    SharedPrincipalResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let resolver = SharedPrincipalResolver::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let auth_context = resolver.resolve(&token).await?;

        Ok(AuthUser(auth_context))
    }
}
