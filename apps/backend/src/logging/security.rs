//! Structured security event logging.
//!
//! Rejected credentials are logged with a short blake3 fingerprint of the
//! presented token. The raw token and the server secret never reach the log
//! stream.

use tracing::{debug, warn};

use crate::auth::claims::ResolvedIdentity;
use crate::auth::token::AuthError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Short, stable fingerprint of a presented token, safe for logs. Two
/// requests carrying the same token produce the same fingerprint, so
/// repeated abuse is correlatable without storing the credential.
pub fn token_fingerprint(token: &str) -> String {
    let hash = blake3::hash(token.as_bytes());
    hash.to_hex()[..16].to_string()
}

/// Log a successful verification at debug level. The email claim is
/// redacted on the way out; the token itself never reaches this function.
pub fn token_accepted(identity: &ResolvedIdentity) {
    let trace_id = trace_ctx::trace_id();

    debug!(
        event = "SECURITY_TOKEN_ACCEPTED",
        %trace_id,
        sub = %identity.sub,
        role = %identity.role,
        email = %Redacted(identity.email.as_deref().unwrap_or("-")),
        "Bearer token accepted"
    );
}

/// Log a rejected bearer token.
pub fn token_rejected(reason: &AuthError, token: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        token_fp = %token_fingerprint(token),
        reason = %reason,
        "Bearer token rejected"
    );
}

/// Log a role-gate denial.
pub fn role_denied(role: &str, allowed: &[&str]) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ROLE_DENIED",
        %trace_id,
        role,
        allowed = %allowed.join(","),
        "Role not in allow-list"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let fp = token_fingerprint("header.payload.signature");
        assert_eq!(fp, token_fingerprint("header.payload.signature"));
        assert_eq!(fp.len(), 16);
    }

    #[test]
    fn accepted_event_masks_the_email_it_logs() {
        // Same rendering the accepted-event call site uses.
        let rendered = format!("{}", Redacted("globaladmin@example.test"));
        assert_eq!(rendered, "g***@example.test");
        assert!(!rendered.contains("globaladmin@"));
    }

    #[test]
    fn accepted_event_handles_identities_without_email() {
        let identity = ResolvedIdentity {
            sub: "u-1".to_string(),
            role: "company_admin".to_string(),
            email: None,
        };
        token_accepted(&identity);

        let with_email = ResolvedIdentity {
            email: Some("user@example.test".to_string()),
            ..identity
        };
        token_accepted(&with_email);
    }

    #[test]
    fn fingerprint_does_not_reveal_the_token() {
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1In0.c2ln";
        let fp = token_fingerprint(token);
        assert!(!token.contains(&fp));
        assert_ne!(fp, token_fingerprint("a different token"));
    }
}
