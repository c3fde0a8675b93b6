pub mod admin;
pub mod health;
pub mod profile;

use actix_web::web;

/// Public routes that need no authentication.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(health::configure_routes));
}
