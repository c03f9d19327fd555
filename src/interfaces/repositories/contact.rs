use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact::{NewContactSubmission, StoredSubmission},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactSubmissionRepository: Send + Sync {
    async fn create_submission(&self, submission: &NewContactSubmission) -> Result<StoredSubmission, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactSubmissionRepository for SqlxContactRepo {
    async fn create_submission(&self, submission: &NewContactSubmission) -> Result<StoredSubmission, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO contact_submissions (name, company, email, service, budget, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.company)
        .bind(&submission.email)
        .bind(&submission.service)
        .bind(&submission.budget)
        .bind(&submission.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredSubmission { id })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
