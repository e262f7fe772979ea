use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http, web, HttpMessage, HttpRequest, HttpResponse,
};
use futures::{future::LocalBoxFuture, FutureExt};
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::info;

use crate::{
    domain::entities::session_user::SessionUser,
    repositories::session_jwt_repository::SessionJwtRepository,
};

/// Extracts the session token of a request: the session cookie first, then a Bearer
/// `Authorization` header for non-browser clients
pub fn extract_session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Middleware rejecting requests without a valid session.
///
/// The authenticated `SessionUser` is inserted in the request extensions.
pub struct SessionMiddleware<S> {
    service: Rc<S>,
    session_repository: web::Data<SessionJwtRepository>,
}

impl<S> Service<ServiceRequest> for SessionMiddleware<S>
where
    S: Service<
            ServiceRequest,
            Response = ServiceResponse<actix_web::body::BoxBody>,
            Error = actix_web::Error,
        > + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, actix_web::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token =
            extract_session_token(req.request(), self.session_repository.cookie_name());

        let user = match token.map(|token| self.session_repository.decode_user(&token)) {
            Some(Ok(user)) => user,
            Some(Err(error)) => {
                info!(?error, "Invalid session credential");
                return Box::pin(ready(Ok(unauthorized(req))));
            }
            None => return Box::pin(ready(Ok(unauthorized(req)))),
        };

        let srv = Rc::clone(&self.service);

        async move {
            req.extensions_mut().insert::<SessionUser>(user);

            let res = srv.call(req).await?;
            Ok(res)
        }
        .boxed_local()
    }
}

fn unauthorized(req: ServiceRequest) -> ServiceResponse<actix_web::body::BoxBody> {
    req.into_response(HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" })))
}

/// Middleware factory requiring a session
pub struct RequireSession {
    session_repository: web::Data<SessionJwtRepository>,
}

impl RequireSession {
    pub fn new(session_repository: web::Data<SessionJwtRepository>) -> Self {
        Self { session_repository }
    }
}

impl<S> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<
            ServiceRequest,
            Response = ServiceResponse<actix_web::body::BoxBody>,
            Error = actix_web::Error,
        > + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = actix_web::Error;
    type Transform = SessionMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddleware {
            service: Rc::new(service),
            session_repository: self.session_repository.clone(),
        }))
    }
}
