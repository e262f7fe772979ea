use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::repositories::session_jwt_repository::SessionJwtRepository;

/// Expires the session cookie. Tokens are stateless: a copied token stays valid until it expires.
#[tracing::instrument(name = "Sign out user account", skip(session_repository))]
pub async fn sign_out_account(session_repository: web::Data<SessionJwtRepository>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session_repository.removal_cookie())
        .json(json!({ "success": true }))
}
