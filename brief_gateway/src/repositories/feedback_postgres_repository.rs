use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    domain::entities::feedback::NewFeedback,
    ports::{feedback_repository::FeedbackRepository, repository_error::RepositoryError},
};

pub struct FeedbackPostgresRepository {
    pool: PgPool,
}

impl FeedbackPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackPostgresRepository {
    #[tracing::instrument(name = "Saving feedback in database", skip(self))]
    async fn add(&self, feedback: &NewFeedback) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
    INSERT INTO feedback (user_id, brief_id, rating, likes, dislikes)
    VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(feedback.user_id)
        .bind(feedback.brief_id)
        .bind(feedback.rating)
        .bind(&feedback.likes)
        .bind(&feedback.dislikes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
