use async_trait::async_trait;
use common::helper::error_chain_fmt;

use crate::domain::entities::user::{CreatingUser, StoredUser};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn add_user(&self, user: &CreatingUser) -> Result<(), UserRepositoryError>;

    /// Emails are compared lowercased
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, UserRepositoryError>;
}

#[derive(thiserror::Error)]
pub enum UserRepositoryError {
    #[error("An account already exists for {0}")]
    EmailAlreadyUsed(String),
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for UserRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
