use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::admin::AdminState;

/// Require `Authorization: Bearer <api_key>` on every admin request.
pub async fn admin_auth_middleware(
    State(state): State<AdminState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let authorized = matches!(token, Some(t) if api_key_matches(t, &state.api_key));
    if authorized {
        return Ok(next.run(request).await);
    }

    tracing::warn!(path = %request.uri().path(), "Rejected admin request");
    Err(StatusCode::UNAUTHORIZED)
}

/// Constant-time token comparison. An empty configured key matches nothing.
fn api_key_matches(provided: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matches() {
        assert!(api_key_matches("s3cret", "s3cret"));
        assert!(!api_key_matches("s3creT", "s3cret"));
        assert!(!api_key_matches("s3cre", "s3cret"));
        assert!(!api_key_matches("s3cret-and-more", "s3cret"));
    }

    #[test]
    fn test_empty_key_never_matches() {
        assert!(!api_key_matches("", ""));
        assert!(!api_key_matches("anything", ""));
    }
}
