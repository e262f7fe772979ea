use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::entities::embedding::{EmbeddingDocument, EmbeddingRecord},
    ports::{
        embedding_repository::EmbeddingRepository,
        text_embedder::TextEmbedder,
        vector_index::{VectorIndex, VectorIndexError},
    },
};

/// Embeds documents in one batch and appends them to the embedding store
pub struct EmbeddingVectorIndex {
    embedder: Arc<dyn TextEmbedder>,
    repository: Arc<dyn EmbeddingRepository>,
}

impl EmbeddingVectorIndex {
    pub fn new(embedder: Arc<dyn TextEmbedder>, repository: Arc<dyn EmbeddingRepository>) -> Self {
        Self {
            embedder,
            repository,
        }
    }
}

#[async_trait]
impl VectorIndex for EmbeddingVectorIndex {
    #[tracing::instrument(name = "Indexing documents", skip(self, documents), fields(nb_documents = documents.len()))]
    async fn index(
        &self,
        user_id: Option<Uuid>,
        documents: Vec<EmbeddingDocument>,
    ) -> Result<(), VectorIndexError> {
        if documents.is_empty() {
            return Ok(());
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedder.embed(&contents).await?;
        if embeddings.len() != documents.len() {
            return Err(VectorIndexError::Other(anyhow::anyhow!(
                "Got {} embeddings for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        let records: Vec<EmbeddingRecord> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| EmbeddingRecord {
                user_id,
                content: document.content,
                embedding,
                metadata: document.metadata,
            })
            .collect();

        self.repository.add_many(&records).await?;

        info!(nb_records = records.len(), "Documents indexed");
        Ok(())
    }
}
