use async_trait::async_trait;
use secrecy::Secret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    domain::entities::user::{CreatingUser, StoredUser},
    ports::user_repository::{UserRepository, UserRepositoryError},
};

/// User repository implemented using Postgres
pub struct UserPostgresRepository {
    pool: PgPool,
}

impl UserPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for UserPostgresRepository {
    #[tracing::instrument(name = "Saving new user in database", skip(self, user), fields(user_id = %user.id))]
    async fn add_user(&self, user: &CreatingUser) -> Result<(), UserRepositoryError> {
        sqlx::query(
            r#"
    INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.email.as_ref())
        .bind(user.password_hash.as_ref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                UserRepositoryError::EmailAlreadyUsed(user.email.to_string())
            }
            _ => UserRepositoryError::DatabaseError(error),
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Finding user by email in database", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
    SELECT id, name, email, password_hash FROM users
    WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| StoredUser {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: Secret::new(row.password_hash),
        }))
    }
}
