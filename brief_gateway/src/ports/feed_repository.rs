use async_trait::async_trait;
use uuid::Uuid;

use super::repository_error::RepositoryError;
use crate::domain::entities::feed::{Feed, NewFeed};

/// Every lookup is scoped by the owning user: a feed of another user is never returned
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Newest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Feed>, RepositoryError>;

    async fn add(&self, feed: NewFeed) -> Result<Feed, RepositoryError>;

    async fn find_owned(&self, id: i64, user_id: Uuid) -> Result<Option<Feed>, RepositoryError>;

    /// Returns whether a feed was deleted
    async fn delete_owned(&self, id: i64, user_id: Uuid) -> Result<bool, RepositoryError>;
}
