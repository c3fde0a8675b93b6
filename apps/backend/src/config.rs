//! Centralized application configuration loaded from environment variables.
//!
//! Everything security-relevant is validated here, once, at startup. A
//! missing, short, or placeholder JWT secret is a fatal configuration error
//! and never surfaces as a per-request failure.

use std::env;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, PLACEHOLDER_JWT_SECRET};

const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub jwt_secret: String,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::config("JWT_SECRET must be set".to_string()))?;
        validate_jwt_secret(&jwt_secret)?;

        Ok(Config {
            host,
            port,
            jwt_secret,
        })
    }

    /// Security configuration carrying the verification key, injected into
    /// application state at startup.
    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes())
    }
}

fn validate_jwt_secret(secret: &str) -> Result<(), AppError> {
    if secret.len() < MIN_JWT_SECRET_LEN {
        return Err(AppError::config(format!(
            "JWT_SECRET is too short. It should be at least {MIN_JWT_SECRET_LEN} characters."
        )));
    }
    if secret == PLACEHOLDER_JWT_SECRET {
        return Err(AppError::config(
            "JWT_SECRET is still the sample placeholder value. Generate a real secret before starting.".to_string(),
        ));
    }
    Ok(())
}
