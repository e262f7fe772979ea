use chrono::{DateTime, Utc};
use common::{helper::error_chain_fmt, telemetry::spawn_blocking_with_tracing};
use secrecy::Secret;
use tracing::info;
use uuid::Uuid;

use super::{
    user_email::{UserEmail, UserEmailError},
    user_password::{UserPassword, UserPasswordError},
};

/// Represents a user account.
///
/// The account is used in different contexts: while creating it,
/// and when a sign-in checks its stored password.
pub struct User;

#[derive(Debug, Clone)]
pub struct CreatingUser {
    pub id: Uuid,
    pub name: String,
    pub email: UserEmail,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Secret<String>,
}

impl User {
    /// Creates a user, generating their hashed password
    ///
    /// Hashing runs on a blocking thread.
    pub async fn create(
        name: &str,
        email: &str,
        password: Secret<String>,
    ) -> Result<CreatingUser, UserError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::MissingName);
        }

        let email = UserEmail::parse(email)?;
        UserPassword::check_candidate(&password)?;
        info!(email = email.as_ref(), "Valid email");

        let password_hash =
            spawn_blocking_with_tracing(move || UserPassword::compute_password_hash(password))
                .await
                .map_err(|e| {
                    UserError::InternalError(format!(
                        "Unexpected error when spawning blocking thread: {}",
                        e
                    ))
                })??;

        let now = Utc::now();
        Ok(CreatingUser {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

impl StoredUser {
    /// Checks a clear password against the stored hash, on a blocking thread
    pub async fn verify_password_hash(
        &self,
        password_candidate: Secret<String>,
    ) -> Result<(), UserError> {
        let stored_hash = self.password_hash.clone();

        spawn_blocking_with_tracing(move || {
            UserPassword::parse(stored_hash)?.verify(password_candidate)
        })
        .await
        .map_err(|e| {
            UserError::InternalError(format!(
                "Unexpected error when spawning blocking thread: {}",
                e
            ))
        })??;

        Ok(())
    }
}

#[derive(thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    PasswordError(#[from] UserPasswordError),
    #[error(transparent)]
    EmailError(#[from] UserEmailError),
    #[error("A name is required")]
    MissingName,
    #[error("Internal: {0}")]
    InternalError(String),
}

impl std::fmt::Debug for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
