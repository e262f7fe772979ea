use async_trait::async_trait;
use common::helper::error_chain_fmt;
use uuid::Uuid;

use super::{repository_error::RepositoryError, text_embedder::TextEmbedderError};
use crate::domain::entities::embedding::EmbeddingDocument;

/// Best-effort index of texts for later similarity lookups
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn index(
        &self,
        user_id: Option<Uuid>,
        documents: Vec<EmbeddingDocument>,
    ) -> Result<(), VectorIndexError>;
}

#[derive(thiserror::Error)]
pub enum VectorIndexError {
    #[error(transparent)]
    EmbedderError(#[from] TextEmbedderError),
    #[error(transparent)]
    RepositoryError(#[from] RepositoryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
