//! Repository implementations for the Applications domain
//!
//! The status transition service talks to storage only through the traits
//! below. Postgres implementations live next to them; in-memory ones are in
//! [`crate::mock`].

pub mod applications;
pub mod jobs;
pub mod memberships;

use jobboard_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Application, JobProjection};
use crate::domain::state::ApplicationStatus;

pub use applications::PgApplicationRepository;
pub use jobs::PgJobRepository;
pub use memberships::PgCompanyMembership;

/// Application storage as seen by the status transition service
#[async_trait::async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find an application by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Application>, RepositoryError>;

    /// Set `status` (and `notes`, when given) only if the stored status is
    /// still `expected`, refreshing `updated_at`.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the stored status has
    /// moved on, leaving the row untouched.
    async fn compare_and_swap_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        new_status: ApplicationStatus,
        notes: Option<&str>,
    ) -> Result<Application, RepositoryError>;
}

/// Read access to job postings
#[async_trait::async_trait]
pub trait JobRepository: Send + Sync {
    /// Find the minimal job projection by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<JobProjection>, RepositoryError>;
}

/// Company membership capability
#[async_trait::async_trait]
pub trait CompanyMembership: Send + Sync {
    /// Whether `user_id` belongs to `company_id`
    async fn is_member(&self, user_id: Uuid, company_id: Uuid) -> Result<bool, RepositoryError>;
}

/// Combined Postgres repository access for the Applications domain
#[derive(Clone)]
pub struct ApplicationsRepositories {
    pub applications: PgApplicationRepository,
    pub jobs: PgJobRepository,
    pub memberships: PgCompanyMembership,
}

impl ApplicationsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            applications: PgApplicationRepository::new(pool.clone()),
            jobs: PgJobRepository::new(pool.clone()),
            memberships: PgCompanyMembership::new(pool),
        }
    }
}
