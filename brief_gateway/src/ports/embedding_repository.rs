use async_trait::async_trait;

use super::repository_error::RepositoryError;
use crate::domain::entities::embedding::EmbeddingRecord;

/// Append-only store of embedded texts
#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    async fn add_many(&self, records: &[EmbeddingRecord]) -> Result<(), RepositoryError>;
}
