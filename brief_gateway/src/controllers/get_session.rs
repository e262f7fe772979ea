use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    middlewares::session_authentication::extract_session_token,
    repositories::session_jwt_repository::SessionJwtRepository,
};

/// Current session of the caller, or JSON `null` when there is none
#[tracing::instrument(name = "Get session", skip(req, session_repository))]
pub async fn get_session(
    req: HttpRequest,
    session_repository: web::Data<SessionJwtRepository>,
) -> HttpResponse {
    let Some(token) = extract_session_token(&req, session_repository.cookie_name()) else {
        return HttpResponse::Ok().json(Value::Null);
    };

    let session = session_repository
        .decode_token(&token)
        .and_then(|claims| Ok((claims.user()?, claims.expires_at())));

    match session {
        Ok((user, expires_at)) => HttpResponse::Ok().json(json!({
            "session": { "userId": user.id, "expiresAt": expires_at },
            "user": user,
        })),
        Err(error) => {
            info!(?error, "Invalid session credential");
            HttpResponse::Ok().json(Value::Null)
        }
    }
}
