//! Claim types decoded from bearer tokens.

use serde::{Deserialize, Serialize};

/// Raw claims decoded from a token payload.
///
/// Field presence is validated by `auth::token::verify_token`, not by serde:
/// a payload missing `sub` or `exp` still deserializes, so the verifier can
/// report the precise claim that is missing.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Claims {
    pub sub: Option<String>,
    /// Expiry (seconds since epoch)
    pub exp: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    /// Top-level role claim. For issuer-minted tokens this is usually just
    /// the `authenticated` session marker, not a business role.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

/// The `user_metadata` claim object. Only the role field matters here;
/// other metadata keys are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UserMetadata {
    /// Business role assigned through the admin console. Preferred over the
    /// top-level `role` claim.
    #[serde(default)]
    pub role: Option<String>,
}

/// Verified identity stored in request extensions by the `TokenAuth`
/// middleware.
///
/// Invariant: only ever constructed from a token whose signature verified
/// against the server secret and whose expiry is in the future. Built fresh
/// per request and discarded with it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub sub: String,
    pub role: String,
    pub email: Option<String>,
}
