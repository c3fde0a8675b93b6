//! Role-gate middleware.
//!
//! Wraps a scope after `TokenAuth` and rejects requests whose resolved role
//! is not in the allow-list. Allow-lists are exact lowercase role strings;
//! there is no implied hierarchy, a scope that should admit several tiers
//! lists them all.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::ResolvedIdentity;
use crate::auth::role;
use crate::error::AppError;
use crate::logging::security;

pub struct RequireRole {
    allowed: Rc<Vec<&'static str>>,
}

impl RequireRole {
    /// Gate on an explicit allow-list.
    pub fn of(allowed: &[&'static str]) -> Self {
        Self {
            allowed: Rc::new(allowed.to_vec()),
        }
    }

    pub fn company_admin() -> Self {
        Self::of(&[role::COMPANY_ADMIN])
    }

    pub fn reseller_admin() -> Self {
        Self::of(&[role::RESELLER_ADMIN])
    }

    pub fn global_admin() -> Self {
        Self::of(&[role::GLOBAL_ADMIN])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service,
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: S,
    allowed: Rc<Vec<&'static str>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let identity = req.extensions().get::<ResolvedIdentity>().cloned();

        // TokenAuth must run first. No identity at this point means the
        // scope is miswired, not that the caller is anonymous.
        let identity = match identity {
            Some(identity) => identity,
            None => return Box::pin(async { Err(AppError::forbidden().into()) }),
        };

        if role::authorize(&identity, &self.allowed) {
            let fut = self.service.call(req);
            Box::pin(fut)
        } else {
            security::role_denied(&identity.role, &self.allowed);
            Box::pin(async { Err(AppError::forbidden_role_denied().into()) })
        }
    }
}
