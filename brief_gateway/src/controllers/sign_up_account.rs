use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use secrecy::Secret;
use serde_json::json;
use tracing::info;

use crate::{
    domain::entities::{
        session_user::SessionUser,
        user::{User, UserError},
    },
    ports::user_repository::{UserRepository, UserRepositoryError},
    repositories::session_jwt_repository::{SessionJwtRepository, SessionJwtRepositoryError},
};

/// Creates an account with an email and a password, and opens a session for it
#[tracing::instrument(
    name = "Sign up user account",
    skip(user_repository, session_repository, body)
)]
pub async fn sign_up_account(
    user_repository: web::Data<dyn UserRepository>,
    session_repository: web::Data<SessionJwtRepository>,
    body: web::Json<SignUpAccountBodyData>,
) -> Result<HttpResponse, SignUpAccountError> {
    let SignUpAccountBodyData {
        name,
        email,
        password,
    } = body.into_inner();
    info!(%email, "Creating account");

    let user = User::create(&name, &email, Secret::new(password))
        .await
        .map_err(|error| match error {
            UserError::InternalError(_) => SignUpAccountError::InternalError(anyhow::anyhow!(
                "Failed to hash the password: {:?}",
                error
            )),
            _ => SignUpAccountError::InvalidInput(error.to_string()),
        })?;

    user_repository
        .add_user(&user)
        .await
        .map_err(|error| match error {
            UserRepositoryError::EmailAlreadyUsed(_) => SignUpAccountError::EmailAlreadyUsed,
            _ => SignUpAccountError::InternalError(error.into()),
        })?;

    let session_user = SessionUser {
        id: user.id,
        email: user.email.to_string(),
        name: user.name,
    };
    let session = session_repository.create_token(&session_user)?;

    info!(email = %session_user.email, "Successfully created user");
    Ok(HttpResponse::Ok()
        .cookie(session_repository.session_cookie(&session))
        .json(json!({ "token": session.token, "user": session_user })))
}

/// Clients of the auth endpoints may send extra fields (callback URL, image...): they are ignored
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct SignUpAccountBodyData {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(thiserror::Error)]
pub enum SignUpAccountError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("User already exists. Use another email.")]
    EmailAlreadyUsed,
    #[error("Failed to create the account")]
    SessionError(#[from] SessionJwtRepositoryError),
    #[error("Failed to create the account")]
    InternalError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SignUpAccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignUpAccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignUpAccountError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SignUpAccountError::EmailAlreadyUsed => StatusCode::UNPROCESSABLE_ENTITY,
            SignUpAccountError::SessionError(_) | SignUpAccountError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[tracing::instrument(name = "Response error from sign_up_account controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "message": self.to_string() }))
    }
}
