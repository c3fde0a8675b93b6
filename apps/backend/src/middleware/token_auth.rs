//! Bearer-token authentication middleware.
//!
//! Extracts the Authorization header, runs the canonical token verification
//! against the secret held in `AppState`, and stores the resulting
//! `ResolvedIdentity` in request extensions for extractors and role gates.
//! It only runs on protected scopes and rejects the request before the
//! handler is ever invoked.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_from_header;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct TokenAuth;

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware { service }))
    }
}

pub struct TokenAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
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
        let token = match bearer_from_header(req.headers().get(header::AUTHORIZATION)) {
            Ok(token) => token,
            Err(err) => return Box::pin(async move { Err(err.into()) }),
        };

        let app_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                return Box::pin(async {
                    Err(AppError::internal("AppState not available".to_string()).into())
                });
            }
        };

        match verify_token(&token, &app_state.security) {
            Ok(identity) => {
                security::token_accepted(&identity);

                // Store the verified identity BEFORE calling the service so
                // extractors and role gates can read it.
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(err) => {
                security::token_rejected(&err, &token);
                Box::pin(async move { Err(AppError::from(err).into()) })
            }
        }
    }
}
