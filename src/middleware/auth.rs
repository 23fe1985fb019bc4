use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service::{self, Claims};
use crate::utils::AppError;

/// Pulls the bearer token out of the Authorization header and verifies it.
/// Missing, malformed and expired tokens each get their own 401 message.
fn bearer_claims(headers: &HeaderMap) -> Result<Claims, AppError> {
    let header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".into()))?;

    auth_service::verify_token(token)
}

/// Bearer-token guard. Verifies the JWT before the handler runs and stores
/// the claims in the request extensions; handlers read them back through
/// `current_user_id`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match bearer_claims(req.headers()) {
            Ok(claims) => {
                req.extensions_mut().insert::<Claims>(claims);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}

/// Resolves the authenticated user id for a handler. Routes behind
/// `AuthMiddleware` read the attached claims; routes that share a path
/// with a public method (POST /api/feedback) verify the header here.
pub fn current_user_id(req: &HttpRequest) -> Result<String, AppError> {
    if let Some(claims) = req.extensions().get::<Claims>() {
        return Ok(claims.sub.clone());
    }
    bearer_claims(req.headers()).map(|c| c.sub)
}
