//! Principal resolution for the Jobboard API
//!
//! Provides JWT validation, the users read model, and axum extractors
//! that work with any domain state exposing a shared [`PrincipalResolver`]
//! through `FromRef<S>`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
pub mod mock;
mod resolver;
mod types;

pub use backend::AuthBackend;
pub use claims::JwtClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use resolver::{PrincipalResolver, SharedPrincipalResolver};
pub use types::{ActorRole, AuthIdentity, UnknownRole};
