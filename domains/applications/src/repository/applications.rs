//! Application repository

use jobboard_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::ApplicationRepository;
use crate::domain::entities::Application;
use crate::domain::state::ApplicationStatus;

const APPLICATION_COLUMNS: &str = "id, job_id, candidate_id, status, cover_letter, \
     resume_url, notes, applied_at, updated_at";

#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Application>, RepositoryError> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let row = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn compare_and_swap_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        new_status: ApplicationStatus,
        notes: Option<&str>,
    ) -> Result<Application, RepositoryError> {
        // The status predicate makes this a single-statement CAS. updated_at
        // is bumped past its previous value even if the clock has not moved.
        let query = format!(
            "UPDATE applications SET \
                status = $3, \
                notes = COALESCE($4, notes), \
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 AND status = $2 \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(expected)
            .bind(new_status)
            .bind(notes)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(RepositoryError::Conflict)
    }
}
