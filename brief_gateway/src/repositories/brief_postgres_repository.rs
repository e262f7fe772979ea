use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::entities::brief::{Brief, NewBrief},
    ports::{brief_repository::BriefRepository, repository_error::RepositoryError},
};

pub struct BriefPostgresRepository {
    pool: PgPool,
}

impl BriefPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BriefRow {
    id: i64,
    user_id: Uuid,
    feed_id: Option<i64>,
    date: chrono::NaiveDate,
    transcript: String,
    audio_url: String,
    status: crate::domain::entities::brief::BriefStatus,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BriefRow> for Brief {
    fn from(row: BriefRow) -> Self {
        Brief {
            id: row.id,
            user_id: row.user_id,
            feed_id: row.feed_id,
            date: row.date,
            transcript: row.transcript,
            audio_url: row.audio_url,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BriefRepository for BriefPostgresRepository {
    #[tracing::instrument(name = "Saving new brief in database", skip(self, brief), fields(user_id = %brief.user_id, feed_id = ?brief.feed_id))]
    async fn add(&self, brief: NewBrief) -> Result<Brief, RepositoryError> {
        let row = sqlx::query_as::<_, BriefRow>(
            r#"
    INSERT INTO briefs (user_id, feed_id, date, transcript, audio_url, status)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, user_id, feed_id, date, transcript, audio_url, status, created_at
            "#,
        )
        .bind(brief.user_id)
        .bind(brief.feed_id)
        .bind(brief.date)
        .bind(&brief.transcript)
        .bind(&brief.audio_url)
        .bind(brief.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Listing briefs from database", skip(self))]
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Brief>, RepositoryError> {
        let rows = sqlx::query_as::<_, BriefRow>(
            r#"
    SELECT id, user_id, feed_id, date, transcript, audio_url, status, created_at FROM briefs
    WHERE user_id = $1
    ORDER BY date DESC, created_at DESC
    LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Brief::from).collect())
    }

    #[tracing::instrument(name = "Getting brief from database", skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Brief>, RepositoryError> {
        let row = sqlx::query_as::<_, BriefRow>(
            r#"
    SELECT id, user_id, feed_id, date, transcript, audio_url, status, created_at FROM briefs
    WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Brief::from))
    }
}
