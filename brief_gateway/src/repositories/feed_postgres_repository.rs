use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    domain::entities::{
        feed::{Feed, NewFeed},
        interest::InterestSelection,
    },
    ports::{feed_repository::FeedRepository, repository_error::RepositoryError},
};

pub struct FeedPostgresRepository {
    pool: PgPool,
}

impl FeedPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FeedRow {
    id: i64,
    user_id: Uuid,
    name: String,
    interests: Json<Vec<InterestSelection>>,
    context: Option<String>,
    timeframe: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedRow> for Feed {
    type Error = RepositoryError;

    fn try_from(row: FeedRow) -> Result<Self, Self::Error> {
        let timeframe = row
            .timeframe
            .parse()
            .with_context(|| format!("Stored feed {} has an invalid timeframe", row.id))?;

        Ok(Feed {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            interests: row.interests.0,
            context: row.context,
            timeframe,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl FeedRepository for FeedPostgresRepository {
    #[tracing::instrument(name = "Listing feeds from database", skip(self))]
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Feed>, RepositoryError> {
        sqlx::query_as::<_, FeedRow>(
            r#"
    SELECT id, user_id, name, interests, context, timeframe, created_at FROM feeds
    WHERE user_id = $1
    ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Feed::try_from)
        .collect()
    }

    #[tracing::instrument(name = "Saving new feed in database", skip(self, feed), fields(user_id = %feed.user_id))]
    async fn add(&self, feed: NewFeed) -> Result<Feed, RepositoryError> {
        let row = sqlx::query_as::<_, FeedRow>(
            r#"
    INSERT INTO feeds (user_id, name, interests, context, timeframe)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, user_id, name, interests, context, timeframe, created_at
            "#,
        )
        .bind(feed.user_id)
        .bind(&feed.name)
        .bind(Json(&feed.interests))
        .bind(&feed.context)
        .bind(feed.timeframe.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[tracing::instrument(name = "Getting owned feed from database", skip(self))]
    async fn find_owned(&self, id: i64, user_id: Uuid) -> Result<Option<Feed>, RepositoryError> {
        sqlx::query_as::<_, FeedRow>(
            r#"
    SELECT id, user_id, name, interests, context, timeframe, created_at FROM feeds
    WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Feed::try_from)
        .transpose()
    }

    #[tracing::instrument(name = "Deleting owned feed from database", skip(self))]
    async fn delete_owned(&self, id: i64, user_id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM feeds WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
