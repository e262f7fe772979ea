use async_trait::async_trait;
use common::helper::error_chain_fmt;

use crate::domain::entities::embedding::Embedding;

#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// One embedding per text, in the same order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, TextEmbedderError>;
}

#[derive(thiserror::Error)]
pub enum TextEmbedderError {
    #[error("Expected {expected} embeddings, received {received}")]
    CountMismatch { expected: usize, received: usize },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for TextEmbedderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
