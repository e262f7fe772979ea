use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::{
    domain::entities::embedding::EmbeddingRecord,
    ports::{embedding_repository::EmbeddingRepository, repository_error::RepositoryError},
};

pub struct EmbeddingPostgresRepository {
    pool: PgPool,
}

impl EmbeddingPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmbeddingRepository for EmbeddingPostgresRepository {
    /// All records are inserted in one transaction
    #[tracing::instrument(name = "Saving embeddings in database", skip(self, records), fields(nb_records = records.len()))]
    async fn add_many(&self, records: &[EmbeddingRecord]) -> Result<(), RepositoryError> {
        let mut transaction = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
    INSERT INTO embeddings (user_id, content, embedding, metadata)
    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(record.user_id)
            .bind(&record.content)
            .bind(&record.embedding)
            .bind(Json(&record.metadata))
            .execute(&mut *transaction)
            .await?;
        }

        transaction.commit().await?;
        Ok(())
    }
}
