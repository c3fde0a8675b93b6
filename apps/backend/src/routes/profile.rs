//! Profile endpoint: echoes the verified identity for the current request.
//!
//! Company, user, and license data live behind the hosted data service; the
//! console frontend only needs the backend to say who the caller is and
//! which role it resolved.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::current_identity::CurrentIdentity;

#[derive(Debug, Serialize)]
struct ProfileResponse {
    id: String,
    role: String,
    email: Option<String>,
}

async fn profile(identity: CurrentIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: identity.sub,
        role: identity.role,
        email: identity.email,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(profile));
}
