use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated principal extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Gate for routes that require a signed-in principal. An Authorization
/// header that is absent or carries no token segment fails closed with 401;
/// a present token that does not verify (bad signature, expired, malformed)
/// fails closed with 403. On success the decoded principal is attached to
/// the request for handlers and downstream gates.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;

    let claims = validate_jwt(&token, &config::config().security.jwt_secret)
        .map_err(|_| ApiError::forbidden("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Variant for the public booking-submission route: a valid token attaches
/// the principal so the booking can be linked to it, but anonymous requests
/// (and requests with unverifiable tokens) proceed without one.
pub async fn optional_auth(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Ok(token) = bearer_token(&headers) {
        if let Ok(claims) = validate_jwt(&token, &config::config().security.jwt_secret) {
            request.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(request).await
}

/// Extract the token from an `Authorization: Bearer <token>` header. The
/// scheme word itself is not inspected: whatever follows it is handed to
/// verification, where anything that is not a valid token fails as invalid.
/// Only a header with no token segment at all counts as a missing token.
fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Access token required"))?;

    match auth_str.split(' ').nth(1) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ApiError::unauthorized("Access token required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = bearer_token(&headers).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn scheme_word_is_not_inspected() {
        // The credential still reaches verification, where it fails as an
        // invalid token rather than a missing one
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers).unwrap(), "dXNlcjpwYXNz");
    }

    #[test]
    fn scheme_without_token_is_unauthorized() {
        let err = bearer_token(&headers_with("Bearer")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn empty_token_is_unauthorized() {
        let headers = headers_with("Bearer ");
        assert!(bearer_token(&headers).is_err());
    }
}
