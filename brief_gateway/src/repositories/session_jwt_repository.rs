use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::helper::error_chain_fmt;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{configuration::SessionSettings, domain::entities::session_user::SessionUser};

/// Issues and checks session credentials: HS256 JWT carried in a cookie
///
/// Used in the session middleware and in the auth controllers.
#[derive(Clone)]
pub struct SessionJwtRepository {
    secret: Secret<String>,
    expire_in_s: i64,
    cookie_name: String,
    secure_cookie: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user id
    pub sub: String,

    pub email: String,

    pub name: String,

    /// Issued At
    pub iat: usize,

    /// Expires At
    pub exp: usize,
}

impl SessionClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    pub fn user(&self) -> Result<SessionUser, SessionJwtRepositoryError> {
        let id = Uuid::parse_str(&self.sub)
            .map_err(|_| SessionJwtRepositoryError::InvalidData("Invalid user id".to_string()))?;

        Ok(SessionUser {
            id,
            email: self.email.clone(),
            name: self.name.clone(),
        })
    }
}

/// A freshly signed session credential
#[derive(Debug)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionJwtRepository {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            expire_in_s: settings.expire_in_s,
            cookie_name: settings.cookie_name.clone(),
            secure_cookie: settings.secure_cookie,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Creates a new session token for a user
    #[tracing::instrument(name = "Create session token", skip(self, user), fields(user_id = %user.id))]
    pub fn create_token(&self, user: &SessionUser) -> Result<IssuedSession, SessionJwtRepositoryError> {
        if user.id.is_nil() {
            return Err(SessionJwtRepositoryError::InvalidData(
                "Missing user id".to_string(),
            ));
        }

        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.expire_in_s);
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp().max(0) as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(SessionJwtRepositoryError::EncodingError)?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Decodes a session token, rejecting expired ones
    #[tracing::instrument(name = "Decode session token", skip(self, token))]
    pub fn decode_token(&self, token: &str) -> Result<SessionClaims, SessionJwtRepositoryError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|token| token.claims)
        .map_err(SessionJwtRepositoryError::DecodingError)
    }

    /// Decodes a session token into the user it was issued for
    pub fn decode_user(&self, token: &str) -> Result<SessionUser, SessionJwtRepositoryError> {
        self.decode_token(token)?.user()
    }

    /// HttpOnly cookie carrying a session token
    pub fn session_cookie(&self, session: &IssuedSession) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), session.token.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .max_age(time::Duration::seconds(self.expire_in_s.max(0)))
            .finish()
    }

    /// Cookie replacing the session cookie with an already expired one
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .finish();
        cookie.make_removal();
        cookie
    }
}

#[derive(thiserror::Error)]
pub enum SessionJwtRepositoryError {
    #[error("Invalid session token while decoding: {0}")]
    DecodingError(jsonwebtoken::errors::Error),
    #[error("Error while encoding session token: {0}")]
    EncodingError(jsonwebtoken::errors::Error),
    #[error("Invalid data for a session token: {0}")]
    InvalidData(String),
}

impl std::fmt::Debug for SessionJwtRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
