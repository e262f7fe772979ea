use async_trait::async_trait;
use std::sync::Arc;

use super::gemini_client::GeminiClient;
use crate::{
    domain::entities::embedding::Embedding,
    ports::text_embedder::{TextEmbedder, TextEmbedderError},
};

pub struct GeminiTextEmbedder {
    client: Arc<GeminiClient>,
}

impl GeminiTextEmbedder {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextEmbedder for GeminiTextEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, TextEmbedderError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let embeddings = self
            .client
            .embed(texts)
            .await
            .map_err(|error| TextEmbedderError::Other(anyhow::anyhow!(error)))?;

        if embeddings.len() != texts.len() {
            return Err(TextEmbedderError::CountMismatch {
                expected: texts.len(),
                received: embeddings.len(),
            });
        }

        Ok(embeddings)
    }
}
