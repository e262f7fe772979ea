use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::ports::repository_error::RepositoryError;

/// Controllers whose only failure is a storage one return the repository error as is.
/// Its details are only logged.
impl ResponseError for RepositoryError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    #[tracing::instrument(name = "Response error from a repository", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": "Internal server error" }))
    }
}
