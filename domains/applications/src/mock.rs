//! In-memory repository implementations
//!
//! Used by tests and for running the service without a database.
//! Thread-safe via `Arc<Mutex<>>`; every compare-and-swap happens under a
//! single lock acquisition, so it is atomic with respect to other callers.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, Utc};
use jobboard_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{Application, JobProjection};
use crate::domain::state::ApplicationStatus;
use crate::repository::{ApplicationRepository, CompanyMembership, JobRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|e| RepositoryError::InvalidData(format!("store lock poisoned: {e}")))
}

/// In-memory application store
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationRepository {
    rows: Arc<Mutex<HashMap<Uuid, Application>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an application, as the CRUD side of the job board would
    pub fn insert(&self, application: Application) {
        self.rows
            .lock()
            .expect("applications lock poisoned")
            .insert(application.id, application);
    }

    /// Snapshot of a stored application
    pub fn get(&self, id: Uuid) -> Option<Application> {
        self.rows
            .lock()
            .expect("applications lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Snapshot of every stored application
    pub fn all(&self) -> Vec<Application> {
        self.rows
            .lock()
            .expect("applications lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Number of successful status swaps performed
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Application>, RepositoryError> {
        Ok(lock(&self.rows)?.get(&id).cloned())
    }

    async fn compare_and_swap_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        new_status: ApplicationStatus,
        notes: Option<&str>,
    ) -> Result<Application, RepositoryError> {
        let mut rows = lock(&self.rows)?;
        let row = rows.get_mut(&id).ok_or(RepositoryError::Conflict)?;

        if row.status != expected {
            return Err(RepositoryError::Conflict);
        }

        let now = Utc::now();
        row.updated_at = if now > row.updated_at {
            now
        } else {
            row.updated_at + Duration::microseconds(1)
        };
        row.status = new_status;
        if let Some(notes) = notes {
            row.notes = Some(notes.to_string());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(row.clone())
    }
}

/// In-memory job projection store
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    rows: Arc<Mutex<HashMap<Uuid, JobProjection>>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job owned by `company_id`, returning the projection
    pub fn add_job(&self, company_id: Uuid) -> JobProjection {
        let job = JobProjection {
            id: Uuid::new_v4(),
            company_id,
        };
        self.rows
            .lock()
            .expect("jobs lock poisoned")
            .insert(job.id, job);
        job
    }
}

#[async_trait::async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<JobProjection>, RepositoryError> {
        Ok(lock(&self.rows)?.get(&id).copied())
    }
}

/// In-memory company membership table
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyMembership {
    members: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCompanyMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, user_id: Uuid, company_id: Uuid) {
        self.members
            .lock()
            .expect("members lock poisoned")
            .insert((user_id, company_id));
    }

    /// Number of membership lookups served
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CompanyMembership for InMemoryCompanyMembership {
    async fn is_member(&self, user_id: Uuid, company_id: Uuid) -> Result<bool, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(lock(&self.members)?.contains(&(user_id, company_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_compare_and_swap_applies_on_match() {
        let repo = InMemoryApplicationRepository::new();
        let app = Application::new(Uuid::new_v4(), Uuid::new_v4(), None, None);
        let id = app.id;
        let before = app.updated_at;
        repo.insert(app);

        let updated = repo
            .compare_and_swap_status(
                id,
                ApplicationStatus::Submitted,
                ApplicationStatus::Reviewing,
                Some("screening"),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ApplicationStatus::Reviewing);
        assert_eq!(updated.notes.as_deref(), Some("screening"));
        assert!(updated.updated_at > before);
        assert_eq!(repo.get(id), Some(updated));
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_compare_and_swap_conflicts_on_mismatch() {
        let repo = InMemoryApplicationRepository::new();
        let app = Application::new(Uuid::new_v4(), Uuid::new_v4(), None, None);
        let id = app.id;
        repo.insert(app.clone());

        let result = repo
            .compare_and_swap_status(
                id,
                ApplicationStatus::Reviewing,
                ApplicationStatus::Interview,
                None,
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::Conflict)));
        assert_eq!(repo.get(id), Some(app));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_and_swap_keeps_notes_when_absent() {
        let repo = InMemoryApplicationRepository::new();
        let mut app = Application::new(Uuid::new_v4(), Uuid::new_v4(), None, None);
        app.notes = Some("existing".to_string());
        let id = app.id;
        repo.insert(app);

        let updated = repo
            .compare_and_swap_status(
                id,
                ApplicationStatus::Submitted,
                ApplicationStatus::Rejected,
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("existing"));
    }

    #[tokio::test]
    async fn test_membership_lookup() {
        let members = InMemoryCompanyMembership::new();
        let user = Uuid::new_v4();
        let company = Uuid::new_v4();

        assert!(!members.is_member(user, company).await.unwrap());
        members.add_member(user, company);
        assert!(members.is_member(user, company).await.unwrap());
        assert!(!members.is_member(user, Uuid::new_v4()).await.unwrap());
        assert_eq!(members.lookups(), 3);
    }
}
