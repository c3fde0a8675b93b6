#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::{Claims, ResolvedIdentity};
pub use auth::role::{authorize, resolve_role};
pub use auth::token::{verify_token, verify_token_at, AuthError};
pub use config::Config;
pub use error::AppError;
pub use extractors::current_identity::CurrentIdentity;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::require_role::RequireRole;
pub use middleware::token_auth::TokenAuth;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
