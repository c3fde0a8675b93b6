use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::token::AuthError;
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedMalformedToken")]
    UnauthorizedMalformedToken,
    #[error("UnauthorizedUndecodableClaims")]
    UnauthorizedUndecodableClaims,
    #[error("UnauthorizedInvalidClaims: {detail}")]
    UnauthorizedInvalidClaims { detail: &'static str },
    #[error("UnauthorizedExpiredToken")]
    UnauthorizedExpiredToken,
    #[error("ForbiddenInvalidSignature")]
    ForbiddenInvalidSignature,
    #[error("ForbiddenMissingRole")]
    ForbiddenMissingRole,
    #[error("ForbiddenRoleDenied")]
    ForbiddenRoleDenied,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable machine-readable code for each error variant
    fn code(&self) -> String {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED".to_string(),
            AppError::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER".to_string(),
            AppError::UnauthorizedMalformedToken => "UNAUTHORIZED_MALFORMED_TOKEN".to_string(),
            AppError::UnauthorizedUndecodableClaims => {
                "UNAUTHORIZED_UNDECODABLE_CLAIMS".to_string()
            }
            AppError::UnauthorizedInvalidClaims { .. } => {
                "UNAUTHORIZED_INVALID_CLAIMS".to_string()
            }
            AppError::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN".to_string(),
            AppError::ForbiddenInvalidSignature => "FORBIDDEN_INVALID_SIGNATURE".to_string(),
            AppError::ForbiddenMissingRole => "FORBIDDEN_MISSING_ROLE".to_string(),
            AppError::ForbiddenRoleDenied => "FORBIDDEN_ROLE_DENIED".to_string(),
            AppError::Forbidden => "FORBIDDEN".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
        }
    }

    /// Human-readable detail for each error variant
    fn detail(&self) -> String {
        match self {
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::UnauthorizedMissingBearer => "Missing or malformed Bearer token".to_string(),
            AppError::UnauthorizedMalformedToken => {
                "Token is not a three-segment bearer token".to_string()
            }
            AppError::UnauthorizedUndecodableClaims => {
                "Token claims could not be decoded".to_string()
            }
            AppError::UnauthorizedInvalidClaims { detail } => {
                format!("Invalid token claims: {detail}")
            }
            AppError::UnauthorizedExpiredToken => "Token expired".to_string(),
            AppError::ForbiddenInvalidSignature => "Token signature is invalid".to_string(),
            AppError::ForbiddenMissingRole => "No role assigned to this account".to_string(),
            AppError::ForbiddenRoleDenied => "Access denied for this role".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail, .. } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedMalformedToken
            | AppError::UnauthorizedUndecodableClaims
            | AppError::UnauthorizedInvalidClaims { .. }
            | AppError::UnauthorizedExpiredToken => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenInvalidSignature
            | AppError::ForbiddenMissingRole
            | AppError::ForbiddenRoleDenied
            | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn forbidden_role_denied() -> Self {
        Self::ForbiddenRoleDenied
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MalformedToken => AppError::UnauthorizedMalformedToken,
            AuthError::InvalidSignature => AppError::ForbiddenInvalidSignature,
            AuthError::UndecodableClaims => AppError::UnauthorizedUndecodableClaims,
            AuthError::InvalidClaims(detail) => AppError::UnauthorizedInvalidClaims { detail },
            AuthError::TokenExpired => AppError::UnauthorizedExpiredToken,
            AuthError::MissingRole => AppError::ForbiddenMissingRole,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://adminconsole.app/errors/{}", code.to_uppercase()),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_the_documented_status_table() {
        let cases: [(AuthError, StatusCode, &str); 6] = [
            (
                AuthError::MalformedToken,
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED_MALFORMED_TOKEN",
            ),
            (
                AuthError::InvalidSignature,
                StatusCode::FORBIDDEN,
                "FORBIDDEN_INVALID_SIGNATURE",
            ),
            (
                AuthError::UndecodableClaims,
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED_UNDECODABLE_CLAIMS",
            ),
            (
                AuthError::InvalidClaims("sub missing"),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED_INVALID_CLAIMS",
            ),
            (
                AuthError::TokenExpired,
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED_EXPIRED_TOKEN",
            ),
            (
                AuthError::MissingRole,
                StatusCode::FORBIDDEN,
                "FORBIDDEN_MISSING_ROLE",
            ),
        ];

        for (auth_err, expected_status, expected_code) in cases {
            let app_err = AppError::from(auth_err.clone());
            assert_eq!(app_err.status(), expected_status, "status for {auth_err:?}");
            assert_eq!(app_err.code(), expected_code, "code for {auth_err:?}");
        }
    }

    #[test]
    fn invalid_claims_detail_is_preserved() {
        let app_err = AppError::from(AuthError::InvalidClaims("exp missing"));
        assert!(app_err.detail().contains("exp missing"));
    }

    #[test]
    fn humanize_code_splits_words() {
        assert_eq!(
            AppError::humanize_code("FORBIDDEN_ROLE_DENIED"),
            "FORBIDDEN ROLE DENIED"
        );
    }
}
