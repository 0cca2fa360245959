//! Auth read-model types
//!
//! Lightweight view of the `users` rows owned by the accounts service.
//! Carries only the fields needed for authentication and authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Lightweight identity for authenticated users.
///
/// `role` is kept as the raw stored value; it is only interpreted when a
/// caller asks for an [`ActorRole`], so that an unrecognized role surfaces as
/// a typed rejection instead of a decode failure.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of roles an actor may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Candidate,
    Employer,
    Admin,
}

impl ActorRole {
    pub const ALL: [ActorRole; 3] = [ActorRole::Candidate, ActorRole::Employer, ActorRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Candidate => "candidate",
            ActorRole::Employer => "employer",
            ActorRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role is not one of [`ActorRole`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for ActorRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(ActorRole::Candidate),
            "employer" => Ok(ActorRole::Employer),
            "admin" => Ok(ActorRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
