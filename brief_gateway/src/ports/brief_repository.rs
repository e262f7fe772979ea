use async_trait::async_trait;
use uuid::Uuid;

use super::repository_error::RepositoryError;
use crate::domain::entities::brief::{Brief, NewBrief};

#[async_trait]
pub trait BriefRepository: Send + Sync {
    async fn add(&self, brief: NewBrief) -> Result<Brief, RepositoryError>;

    /// Newest first by date, then by creation time
    async fn list_for_user(&self, user_id: Uuid, limit: i64)
        -> Result<Vec<Brief>, RepositoryError>;

    /// Not scoped by user: callers check the ownership
    async fn find_by_id(&self, id: i64) -> Result<Option<Brief>, RepositoryError>;
}
