use actix_web::http::header::{CacheControl, CacheDirective, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use serde_json::json;
use uuid::Uuid;

use crate::ports::audio_storage::{AudioStorage, AudioStorageError};

/// Only names produced by the audio renderer are accepted: `<uuid>.mp3`, lowercase and hyphenated
pub fn is_audio_file_name(file_name: &str) -> bool {
    file_name
        .strip_suffix(".mp3")
        .and_then(|stem| Uuid::parse_str(stem).ok().map(|uuid| (stem, uuid)))
        .map(|(stem, uuid)| uuid.hyphenated().to_string() == stem)
        .unwrap_or(false)
}

/// Serves a rendered brief. Public, so the returned URL can be used directly by an audio element.
#[tracing::instrument(name = "Get audio", skip(audio_storage))]
pub async fn get_audio(
    audio_storage: web::Data<dyn AudioStorage>,
    file_name: web::Path<String>,
) -> Result<HttpResponse, GetAudioError> {
    let file_name = file_name.into_inner();
    if !is_audio_file_name(&file_name) {
        return Err(GetAudioError::InvalidFileName);
    }

    let content = audio_storage
        .load(&file_name)
        .await?
        .ok_or(GetAudioError::NotFound)?;

    Ok(HttpResponse::Ok()
        .content_type("audio/mpeg")
        .insert_header(CacheControl(vec![
            CacheDirective::Private,
            CacheDirective::MaxAge(86400),
        ]))
        .body(content))
}

#[derive(thiserror::Error)]
pub enum GetAudioError {
    #[error("Invalid audio file name")]
    InvalidFileName,
    #[error("Not found")]
    NotFound,
    #[error("Internal server error")]
    StorageError(#[from] AudioStorageError),
}

impl std::fmt::Debug for GetAudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetAudioError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetAudioError::InvalidFileName => StatusCode::BAD_REQUEST,
            GetAudioError::NotFound => StatusCode::NOT_FOUND,
            GetAudioError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from get_audio controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
