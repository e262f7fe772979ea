use serde_json::Value as JsonValue;
use uuid::Uuid;

pub type Embedding = Vec<f32>;

/// Text to index together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingDocument {
    pub content: String,
    pub metadata: JsonValue,
}

/// Append-only record of the vector index
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub user_id: Option<Uuid>,
    pub content: String,
    pub embedding: Embedding,
    pub metadata: JsonValue,
}
