use async_trait::async_trait;

use super::repository_error::RepositoryError;
use crate::domain::entities::feedback::NewFeedback;

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn add(&self, feedback: &NewFeedback) -> Result<(), RepositoryError>;
}
