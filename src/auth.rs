use axum::http::{header, HeaderMap};

use crate::error::AppError;

/// Validate the bearer service token on mutating routes.
///
/// Admin credentials are never compared client-side; callers must present
/// `Authorization: Bearer <token>` matching the configured service token.
pub fn require_service_token(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match provided {
        Some(token) if token == expected => Ok(()),
        Some(_) => Err(AppError::Auth("Invalid service token".into())),
        None => Err(AppError::Auth("Missing bearer token".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_matching_bearer_token() {
        let headers = headers_with("Bearer sekret");
        assert!(require_service_token(&headers, "sekret").is_ok());
    }

    #[test]
    fn rejects_wrong_token() {
        let headers = headers_with("Bearer salah");
        assert!(matches!(
            require_service_token(&headers, "sekret"),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(matches!(
            require_service_token(&HeaderMap::new(), "sekret"),
            Err(AppError::Auth(_))
        ));

        let headers = headers_with("Basic sekret");
        assert!(matches!(
            require_service_token(&headers, "sekret"),
            Err(AppError::Auth(_))
        ));
    }
}
