//! Global-admin-only endpoints. The enclosing scope is wrapped with
//! `RequireRole::global_admin()`, so handlers here can assume the caller's
//! role without re-checking it.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::role;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct RolesResponse {
    roles: Vec<&'static str>,
}

/// Role vocabulary the console can assign, used to populate the role
/// dropdowns in the user-management views.
async fn roles() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(RolesResponse {
        roles: role::ASSIGNABLE_ROLES.to_vec(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/roles", web::get().to(roles));
}
