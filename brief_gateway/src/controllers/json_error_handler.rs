use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    HttpRequest, HttpResponse,
};
use serde_json::json;
use tracing::info;

/// Malformed, incomplete or unexpected JSON bodies are rejected with a 400 `{"error"}` body
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = error.to_string();
    info!(%message, "Rejected JSON payload");

    let response = HttpResponse::BadRequest().json(json!({ "error": message }));
    InternalError::from_response(error, response).into()
}

/// Path segments that do not parse (for ex a non-numeric id) are rejected with a 400 `{"error"}` body
pub fn path_error_handler(error: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = error.to_string();
    info!(%message, "Rejected path parameters");

    let response = HttpResponse::BadRequest().json(json!({ "error": message }));
    InternalError::from_response(error, response).into()
}
