use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Email pattern: matches standard email addresses
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

/// Token pattern: matches Base64/Base64URL-like runs (≥16 chars), which
/// covers bearer token segments and hex digests
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}\b").unwrap()
    });
    &TOKEN_REGEX
}

/// Redacts sensitive information from a string.
///
/// Conservatively masks:
/// - Emails: keeps the first character of the local part and the full domain
/// - Opaque tokens: replaces Base64URL-like runs (≥16 chars) with
///   `[REDACTED_TOKEN]`
///
/// Emails are handled first so their domains are not picked up as tokens.
pub fn redact(input: &str) -> String {
    let email_redacted = email_regex().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                let first_char = &full_match[..1];
                let domain = &full_match[at_pos..];
                format!("{first_char}***{domain}")
            }
            _ => full_match.to_string(),
        }
    });

    token_regex()
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that redacts sensitive strings when displayed, so log call
/// sites can pass raw values without leaking them.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
