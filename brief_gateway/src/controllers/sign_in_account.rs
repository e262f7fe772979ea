use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use secrecy::Secret;
use serde_json::json;
use tracing::{error, info};

use crate::{
    domain::entities::{
        session_user::SessionUser, user::UserError, user_password::UserPasswordError,
    },
    ports::user_repository::{UserRepository, UserRepositoryError},
    repositories::session_jwt_repository::{SessionJwtRepository, SessionJwtRepositoryError},
};

/// Signs a user in with their email and password
///
/// An unknown email and a wrong password get the same response.
///
/// Improvements:
/// - enforce almost constant time by verifying against a dummy hash when the email does not exist
#[tracing::instrument(
    name = "Sign in user account",
    skip(user_repository, session_repository, body)
)]
pub async fn sign_in_account(
    user_repository: web::Data<dyn UserRepository>,
    session_repository: web::Data<SessionJwtRepository>,
    body: web::Json<SignInAccountBodyData>,
) -> Result<HttpResponse, SignInAccountError> {
    let SignInAccountBodyData { email, password } = body.into_inner();
    info!(%email, "Sign in attempt");

    let stored_user = match user_repository.find_by_email(&email).await? {
        Some(stored_user) => stored_user,
        None => {
            info!(%email, "Attempt to sign in to a non-existing user");
            return Err(SignInAccountError::InvalidCredentials);
        }
    };

    stored_user
        .verify_password_hash(Secret::new(password))
        .await
        .map_err(|error| match error {
            UserError::PasswordError(UserPasswordError::InvalidCredentials(_)) => {
                info!(%email, "Wrong password on sign in");
                SignInAccountError::InvalidCredentials
            }
            _ => {
                error!(?error, %email, "Error when verifying password hash during sign in");
                SignInAccountError::InternalError(anyhow::anyhow!(
                    "Could not verify the password hash: {}",
                    error
                ))
            }
        })?;

    let session_user = SessionUser {
        id: stored_user.id,
        email: stored_user.email,
        name: stored_user.name,
    };
    let session = session_repository.create_token(&session_user)?;

    Ok(HttpResponse::Ok()
        .cookie(session_repository.session_cookie(&session))
        .json(json!({ "token": session.token, "user": session_user })))
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SignInAccountBodyData {
    pub email: String,
    pub password: String,
}

#[derive(thiserror::Error)]
pub enum SignInAccountError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Failed to sign in")]
    RepositoryError(#[from] UserRepositoryError),
    #[error("Failed to sign in")]
    SessionError(#[from] SessionJwtRepositoryError),
    #[error("Failed to sign in")]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SignInAccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignInAccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignInAccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SignInAccountError::RepositoryError(_)
            | SignInAccountError::SessionError(_)
            | SignInAccountError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from sign_in_account controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "message": self.to_string() }))
    }
}
