use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use serde_json::json;

use crate::{
    domain::entities::session_user::SessionUser,
    ports::{brief_repository::BriefRepository, repository_error::RepositoryError},
};

/// A brief of another user gets the same response as a missing one
#[tracing::instrument(name = "Get brief", skip(user, brief_repository), fields(user_id = %user.id))]
pub async fn get_brief(
    user: web::ReqData<SessionUser>,
    brief_repository: web::Data<dyn BriefRepository>,
    brief_id: web::Path<i64>,
) -> Result<HttpResponse, GetBriefError> {
    let brief = brief_repository
        .find_by_id(brief_id.into_inner())
        .await?
        .filter(|brief| brief.user_id == user.id)
        .ok_or(GetBriefError::NotFound)?;

    Ok(HttpResponse::Ok().json(brief))
}

#[derive(thiserror::Error)]
pub enum GetBriefError {
    #[error("Not found")]
    NotFound,
    #[error("Internal server error")]
    RepositoryError(#[from] RepositoryError),
}

impl std::fmt::Debug for GetBriefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetBriefError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetBriefError::NotFound => StatusCode::NOT_FOUND,
            GetBriefError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from get_brief controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
