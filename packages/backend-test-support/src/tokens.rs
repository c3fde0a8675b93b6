//! HS256 bearer-token minting for test fixtures.
//!
//! Token issuance is an external auth service in production. Tests hand-build
//! signed tokens with the same HMAC-SHA256 / Base64URL construction so the
//! backend's verification path can be exercised against real signatures,
//! including deliberately broken ones.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{json, Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign already-encoded header and payload segments, returning the full
/// three-segment token. Useful for crafting tokens whose payload is not
/// valid JSON.
pub fn sign_segments(header_b64: &str, payload_b64: &str, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(payload_b64.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{header_b64}.{payload_b64}.{signature}")
}

/// Base64URL-encode arbitrary bytes, for use with [`sign_segments`].
pub fn b64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Seconds since epoch, `offset_secs` from now.
pub fn epoch_secs_from_now(offset_secs: i64) -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_secs() as i64;
    now + offset_secs
}

/// Builder for signed test tokens. Every claim is optional so tests can
/// produce structurally valid tokens with any combination of missing or
/// conflicting claims.
#[derive(Debug, Default, Clone)]
pub struct TokenBuilder {
    sub: Option<String>,
    email: Option<String>,
    exp: Option<i64>,
    top_level_role: Option<String>,
    metadata_role: Option<String>,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub(mut self, sub: &str) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Absolute expiry in seconds since epoch.
    pub fn exp(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Expiry relative to now; negative values produce expired tokens.
    pub fn expires_in(self, secs: i64) -> Self {
        let exp = epoch_secs_from_now(secs);
        self.exp(exp)
    }

    /// Top-level `role` claim (the issuer's session marker slot).
    pub fn role(mut self, role: &str) -> Self {
        self.top_level_role = Some(role.to_string());
        self
    }

    /// `user_metadata.role` claim (the console-assigned business role).
    pub fn metadata_role(mut self, role: &str) -> Self {
        self.metadata_role = Some(role.to_string());
        self
    }

    /// Sign the claims with `secret` and return the token string.
    pub fn sign(self, secret: &[u8]) -> String {
        let mut payload = Map::new();
        if let Some(sub) = self.sub {
            payload.insert("sub".to_string(), Value::String(sub));
        }
        if let Some(email) = self.email {
            payload.insert("email".to_string(), Value::String(email));
        }
        if let Some(exp) = self.exp {
            payload.insert("exp".to_string(), Value::from(exp));
        }
        if let Some(role) = self.top_level_role {
            payload.insert("role".to_string(), Value::String(role));
        }
        if let Some(role) = self.metadata_role {
            payload.insert("user_metadata".to_string(), json!({ "role": role }));
        }

        let header = b64url(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = b64url(Value::Object(payload).to_string().as_bytes());
        sign_segments(&header, &payload, secret)
    }
}

/// Mint a valid token for `sub` with a console-assigned role and a
/// 15-minute TTL, mirroring what the auth service issues.
pub fn mint_token(sub: &str, email: &str, metadata_role: &str, secret: &[u8]) -> String {
    TokenBuilder::new()
        .sub(sub)
        .email(email)
        .metadata_role(metadata_role)
        .role("authenticated")
        .expires_in(15 * 60)
        .sign(secret)
}

/// Mint an expired but otherwise valid token for expiry-path tests.
pub fn mint_expired_token(sub: &str, email: &str, metadata_role: &str, secret: &[u8]) -> String {
    TokenBuilder::new()
        .sub(sub)
        .email(email)
        .metadata_role(metadata_role)
        .role("authenticated")
        .expires_in(-2 * 60 * 60)
        .sign(secret)
}

/// Full Authorization header value for `token`.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
