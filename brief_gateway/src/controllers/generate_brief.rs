use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    domain::entities::session_user::SessionUser,
    ports::audio_renderer::AudioRenderingError,
    use_cases::generate_brief::{GenerateBriefArgs, GenerateBriefError, GenerateBriefUseCase},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateBriefBodyData {
    pub feed_id: Option<i64>,
    pub timeframe: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBriefResponse {
    pub success: bool,
    pub text: String,
    pub audio_url: String,
    pub email_sent: bool,
}

/// Generates a brief for the caller, from a feed or from their profile interests
#[tracing::instrument(name = "Generate brief", skip(user, use_case, body), fields(user_id = %user.id))]
pub async fn generate_brief(
    user: web::ReqData<SessionUser>,
    use_case: web::Data<GenerateBriefUseCase>,
    body: web::Json<GenerateBriefBodyData>,
) -> Result<HttpResponse, GenerateBriefControllerError> {
    let body = body.into_inner();

    let generated = use_case
        .execute(GenerateBriefArgs {
            user_id: user.id,
            feed_id: body.feed_id,
            timeframe: body.timeframe.as_deref(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(GenerateBriefResponse {
        success: true,
        text: generated.brief.transcript,
        audio_url: generated.brief.audio_url,
        email_sent: generated.email_sent,
    }))
}

#[derive(thiserror::Error)]
pub enum GenerateBriefControllerError {
    #[error(transparent)]
    UseCaseError(#[from] GenerateBriefError),
}

impl std::fmt::Debug for GenerateBriefControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GenerateBriefControllerError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateBriefControllerError::UseCaseError(
                GenerateBriefError::RepositoryError(_)
                | GenerateBriefError::AudioRenderingError(AudioRenderingError::StorageError(_)),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            GenerateBriefControllerError::UseCaseError(_) => StatusCode::BAD_REQUEST,
        }
    }

    #[tracing::instrument(name = "Response error from generate_brief controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let message = match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": message }))
    }
}
