//! Canonical bearer-token verification.
//!
//! This is the single verification path for the whole service: HMAC-SHA256
//! over the raw `header.payload` bytes with the server-held secret, a
//! constant-time signature check, then claim validation. Claims are never
//! inspected before the signature verifies, and no "decode without
//! verifying" operation exists outside this module.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::auth::claims::{Claims, ResolvedIdentity};
use crate::auth::role::resolve_role;
use crate::state::security_config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

/// Terminal, non-retryable verification failures. The HTTP mapping lives in
/// `error::AppError`; handlers never see a partially-verified identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("token does not split into three segments")]
    MalformedToken,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token payload is not decodable claims JSON")]
    UndecodableClaims,
    #[error("invalid claims: {0}")]
    InvalidClaims(&'static str),
    #[error("token expired")]
    TokenExpired,
    #[error("no usable role in claims")]
    MissingRole,
}

/// Verify `token` against the configured secret and resolve the caller's
/// identity, using the current wall clock for the expiry check.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<ResolvedIdentity, AuthError> {
    verify_token_at(token, security, SystemTime::now())
}

/// Verify `token` with an explicit clock. [`verify_token`] delegates here;
/// tests use this to pin `now` at expiry boundaries.
pub fn verify_token_at(
    token: &str,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<ResolvedIdentity, AuthError> {
    let mut segments = token.split('.');
    let (header, payload, signature) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
            (h, p, s)
        }
        _ => return Err(AuthError::MalformedToken),
    };

    // Signature first. The payload stays untrusted bytes until the MAC
    // checks out.
    let mut mac = HmacSha256::new_from_slice(&security.jwt_secret)
        .expect("HMAC accepts keys of any length");
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());

    let signature_bytes = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| AuthError::InvalidSignature)?;

    // Constant-time comparison over the full MAC output.
    mac.verify_slice(&signature_bytes)
        .map_err(|_| AuthError::InvalidSignature)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::UndecodableClaims)?;
    let claims: Claims =
        serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::UndecodableClaims)?;

    let exp = claims.exp.ok_or(AuthError::InvalidClaims("exp missing"))?;
    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0);
    if now_secs >= exp {
        return Err(AuthError::TokenExpired);
    }

    let sub = match claims.sub.as_deref() {
        Some(sub) if !sub.is_empty() => sub.to_string(),
        _ => return Err(AuthError::InvalidClaims("sub missing")),
    };

    let role = resolve_role(&claims)?;

    Ok(ResolvedIdentity {
        sub,
        role,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"unit_test_secret_key_0123456789abcdef";

    fn b64(data: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(data)
    }

    fn sign(header_b64: &str, payload_b64: &str, secret: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        b64(&mac.finalize().into_bytes())
    }

    fn token_for(payload: &serde_json::Value, secret: &[u8]) -> String {
        let header = b64(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = b64(payload.to_string().as_bytes());
        let signature = sign(&header, &payload, secret);
        format!("{header}.{payload}.{signature}")
    }

    fn security() -> SecurityConfig {
        SecurityConfig::new(SECRET)
    }

    fn future_exp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 900
    }

    #[test]
    fn valid_token_resolves_identity() {
        let token = token_for(
            &json!({
                "sub": "user-1",
                "exp": future_exp(),
                "email": "admin@example.test",
                "user_metadata": {"role": "company_admin"},
                "role": "authenticated",
            }),
            SECRET,
        );

        let identity = verify_token(&token, &security()).unwrap();
        assert_eq!(identity.sub, "user-1");
        assert_eq!(identity.role, "company_admin");
        assert_eq!(identity.email.as_deref(), Some("admin@example.test"));
    }

    #[test]
    fn top_level_role_is_used_when_metadata_has_none() {
        let token = token_for(
            &json!({"sub": "user-2", "exp": future_exp(), "role": "authenticated"}),
            SECRET,
        );

        let identity = verify_token(&token, &security()).unwrap();
        assert_eq!(identity.role, "authenticated");
        assert_eq!(identity.email, None);
    }

    #[test]
    fn missing_role_everywhere_is_rejected() {
        let token = token_for(&json!({"sub": "user-3", "exp": future_exp()}), SECRET);
        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::MissingRole)
        );
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        let sec = security();
        for token in ["", "abc", "a.b", "a.b.c.d", "..", "a..c"] {
            assert_eq!(
                verify_token(token, &sec),
                Err(AuthError::MalformedToken),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let token = token_for(
            &json!({"sub": "user-4", "exp": future_exp(), "role": "company_user"}),
            SECRET,
        );
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        // Re-encode a payload claiming a higher role, keeping the old signature.
        parts[1] = b64(
            json!({"sub": "user-4", "exp": future_exp(), "role": "global_admin"})
                .to_string()
                .as_bytes(),
        );
        let forged = parts.join(".");

        assert_eq!(
            verify_token(&forged, &security()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = token_for(
            &json!({"sub": "user-5", "exp": future_exp(), "role": "company_user"}),
            b"a_completely_different_secret_value_!!",
        );
        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_signature_segment_is_rejected() {
        let token = token_for(
            &json!({"sub": "user-6", "exp": future_exp(), "role": "company_user"}),
            SECRET,
        );
        let (head, _) = token.rsplit_once('.').unwrap();

        // Not valid Base64URL at all.
        let bad = format!("{head}.!!!!");
        assert_eq!(
            verify_token(&bad, &security()),
            Err(AuthError::InvalidSignature)
        );

        // Valid Base64URL but the wrong length.
        let short = format!("{head}.{}", b64(b"short"));
        assert_eq!(
            verify_token(&short, &security()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn signed_non_json_payload_is_undecodable() {
        let header = b64(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = b64(b"this is not json");
        let signature = sign(&header, &payload, SECRET);
        let token = format!("{header}.{payload}.{signature}");

        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::UndecodableClaims)
        );
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            - 60;
        let token = token_for(
            &json!({"sub": "user-7", "exp": exp, "role": "company_user"}),
            SECRET,
        );
        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let exp = 2_000_000_000i64;
        let token = token_for(&json!({"sub": "user-8", "exp": exp, "role": "company_user"}), SECRET);
        let sec = security();

        let at_exp = SystemTime::UNIX_EPOCH + Duration::from_secs(exp as u64);
        assert_eq!(
            verify_token_at(&token, &sec, at_exp),
            Err(AuthError::TokenExpired)
        );

        let just_before = at_exp - Duration::from_secs(1);
        assert!(verify_token_at(&token, &sec, just_before).is_ok());
    }

    #[test]
    fn missing_exp_is_invalid() {
        let token = token_for(&json!({"sub": "user-9", "role": "company_user"}), SECRET);
        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::InvalidClaims("exp missing"))
        );
    }

    #[test]
    fn missing_or_empty_sub_is_invalid() {
        let sec = security();
        let token = token_for(&json!({"exp": future_exp(), "role": "company_user"}), SECRET);
        assert_eq!(
            verify_token(&token, &sec),
            Err(AuthError::InvalidClaims("sub missing"))
        );

        let token = token_for(
            &json!({"sub": "", "exp": future_exp(), "role": "company_user"}),
            SECRET,
        );
        assert_eq!(
            verify_token(&token, &sec),
            Err(AuthError::InvalidClaims("sub missing"))
        );
    }

    #[test]
    fn expiry_is_checked_before_sub_and_role() {
        // An expired token with no sub/role reports expiry, not claim shape.
        let token = token_for(&json!({"exp": 1}), SECRET);
        assert_eq!(
            verify_token(&token, &security()),
            Err(AuthError::TokenExpired)
        );
    }
}
