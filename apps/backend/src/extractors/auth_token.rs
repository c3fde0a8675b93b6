use actix_web::http::header;

use crate::AppError;

/// Parse an `Authorization: Bearer <token>` header value.
///
/// Single place bearer credentials are read off a request; the `TokenAuth`
/// middleware feeds the result straight into verification. Missing header,
/// a non-Bearer scheme, or an empty token all map to the same 401; the
/// response does not reveal which part was wrong.
pub fn bearer_from_header(header_value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let auth_value = header_value.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AppError::unauthorized_missing_bearer());
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(token.to_string())
}
