//! Job projection repository

use jobboard_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::JobRepository;
use crate::domain::entities::JobProjection;

#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl JobRepository for PgJobRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<JobProjection>, RepositoryError> {
        let row = sqlx::query_as::<_, JobProjection>(
            "SELECT id, company_id FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
