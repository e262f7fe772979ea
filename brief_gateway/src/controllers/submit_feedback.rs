use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    domain::entities::{
        embedding::EmbeddingDocument,
        feedback::{FeedbackError, NewFeedback},
        session_user::SessionUser,
    },
    ports::{
        brief_repository::BriefRepository, feedback_repository::FeedbackRepository,
        repository_error::RepositoryError, vector_index::VectorIndex,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitFeedbackBodyData {
    pub brief_id: i64,
    pub rating: Option<i16>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
}

/// Stores the caller's opinion on one of their briefs.
///
/// Likes and dislikes are also indexed, best-effort.
#[tracing::instrument(
    name = "Submit feedback",
    skip(user, brief_repository, feedback_repository, vector_index, body),
    fields(user_id = %user.id, brief_id = body.brief_id)
)]
pub async fn submit_feedback(
    user: web::ReqData<SessionUser>,
    brief_repository: web::Data<dyn BriefRepository>,
    feedback_repository: web::Data<dyn FeedbackRepository>,
    vector_index: web::Data<dyn VectorIndex>,
    body: web::Json<SubmitFeedbackBodyData>,
) -> Result<HttpResponse, SubmitFeedbackError> {
    let SubmitFeedbackBodyData {
        brief_id,
        rating,
        likes,
        dislikes,
    } = body.into_inner();

    let feedback = NewFeedback::try_new(user.id, brief_id, rating, likes, dislikes)?;

    brief_repository
        .find_by_id(brief_id)
        .await?
        .filter(|brief| brief.user_id == user.id)
        .ok_or(SubmitFeedbackError::BriefNotFound)?;

    feedback_repository.add(&feedback).await?;
    info!("Feedback stored");

    let documents: Vec<EmbeddingDocument> = feedback
        .embedding_contents()
        .into_iter()
        .map(|content| EmbeddingDocument {
            content,
            metadata: json!({ "type": "feedback", "briefId": brief_id }),
        })
        .collect();

    if !documents.is_empty() {
        if let Err(error) = vector_index.index(Some(user.id), documents).await {
            error!(?error, "Failed to index feedback, ignored");
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[derive(thiserror::Error)]
pub enum SubmitFeedbackError {
    #[error(transparent)]
    InvalidFeedback(#[from] FeedbackError),
    #[error("Not found")]
    BriefNotFound,
    #[error("Internal server error")]
    RepositoryError(#[from] RepositoryError),
}

impl std::fmt::Debug for SubmitFeedbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmitFeedbackError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmitFeedbackError::InvalidFeedback(_) => StatusCode::BAD_REQUEST,
            SubmitFeedbackError::BriefNotFound => StatusCode::NOT_FOUND,
            SubmitFeedbackError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from submit_feedback controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
