/// Server-held key material for bearer-token verification.
///
/// Loaded once at startup and injected wherever verification happens;
/// nothing reads the secret from the environment after that.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC-SHA256 key used to verify token signatures
    pub jwt_secret: Vec<u8>,
}

/// The sample value shipped in `.env.example`. Startup refuses to run with
/// it; see `Config::from_env`.
pub const PLACEHOLDER_JWT_SECRET: &str =
    "your-super-secret-jwt-token-with-at-least-32-characters-long";

impl SecurityConfig {
    /// Create a new SecurityConfig with the given verification secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }
}
