use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    domain::entities::{interest::InterestSelection, profile::Profile},
    ports::{profile_repository::ProfileRepository, repository_error::RepositoryError},
};

pub struct ProfilePostgresRepository {
    pool: PgPool,
}

impl ProfilePostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    email: Option<String>,
    name: Option<String>,
    interests: Json<Vec<InterestSelection>>,
    onboarding_complete: bool,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            email: row.email,
            name: row.name,
            interests: row.interests.0,
            onboarding_complete: row.onboarding_complete,
        }
    }
}

#[async_trait]
impl ProfileRepository for ProfilePostgresRepository {
    #[tracing::instrument(name = "Getting profile from database", skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
    SELECT user_id, email, name, interests, onboarding_complete FROM profiles
    WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    #[tracing::instrument(name = "Saving profile interests in database", skip(self, email, name))]
    async fn save_interests(
        &self,
        user_id: Uuid,
        interests: &[InterestSelection],
        email: &str,
        name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
    INSERT INTO profiles (user_id, email, name, interests, onboarding_complete)
    VALUES ($1, $2, $3, $4, TRUE)
    ON CONFLICT (user_id) DO UPDATE
    SET email = EXCLUDED.email,
        name = EXCLUDED.name,
        interests = EXCLUDED.interests,
        onboarding_complete = TRUE,
        updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(name)
        .bind(Json(interests))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
