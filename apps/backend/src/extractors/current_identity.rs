use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::ResolvedIdentity;
use crate::error::AppError;

/// Verified identity for the current request, read from the extensions
/// entry stored by the `TokenAuth` middleware.
///
/// Extraction fails with 401 when the middleware did not run on this route,
/// so a handler can never observe an unverified identity.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentIdentity {
    pub sub: String,
    pub role: String,
    pub email: Option<String>,
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<ResolvedIdentity>()
            .cloned()
            .map(|identity| CurrentIdentity {
                sub: identity.sub,
                role: identity.role,
                email: identity.email,
            })
            .ok_or_else(AppError::unauthorized_missing_bearer);

        std::future::ready(identity)
    }
}
