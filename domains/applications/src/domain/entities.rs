//! Application domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::state::ApplicationStatus;

/// Job application entity
///
/// `status` only changes through the status transition service; the other
/// fields are owned by the CRUD side of the job board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a freshly submitted application
    pub fn new(
        job_id: Uuid,
        candidate_id: Uuid,
        cover_letter: Option<String>,
        resume_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Application {
            id: Uuid::new_v4(),
            job_id,
            candidate_id,
            status: ApplicationStatus::Submitted,
            cover_letter,
            resume_url,
            notes: None,
            applied_at: now,
            updated_at: now,
        }
    }

    /// Check if the application can no longer change status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check if `user_id` is the candidate who submitted this application
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.candidate_id == user_id
    }
}

/// Minimal projection of a job posting: just enough to find its company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobProjection {
    pub id: Uuid,
    pub company_id: Uuid,
}
