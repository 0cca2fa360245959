//! Company membership lookup

use jobboard_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::CompanyMembership;

#[derive(Clone)]
pub struct PgCompanyMembership {
    pool: PgPool,
}

impl PgCompanyMembership {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CompanyMembership for PgCompanyMembership {
    async fn is_member(&self, user_id: Uuid, company_id: Uuid) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM company_members WHERE user_id = $1 AND company_id = $2)",
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
