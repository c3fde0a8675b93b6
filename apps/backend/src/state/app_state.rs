use super::security_config::SecurityConfig;

/// Application state shared across workers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Security configuration including the token verification secret
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }
}
