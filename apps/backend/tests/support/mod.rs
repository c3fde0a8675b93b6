#![allow(dead_code)]

use actix_web::web;
use console_backend::state::app_state::AppState;
use console_backend::state::security_config::SecurityConfig;

// Logging is auto-installed for every integration test binary
#[ctor::ctor]
fn init_logging() {
    console_test_support::test_logging::init();
}

/// Shared verification secret for integration tests. Long enough to pass
/// the startup validation rules, never read from the environment.
pub const TEST_SECRET: &[u8] = b"integration-test-secret-key-0123456789abcdef";

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(SecurityConfig::new(TEST_SECRET)))
}
