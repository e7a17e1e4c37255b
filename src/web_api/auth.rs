//! Bearer-token authentication middleware
//!
//! Rejects unauthenticated requests before any handler runs and attaches
//! the configured audit identity for downstream attribution.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::Error;
use crate::state::AppState;

/// Audit identity of the authenticated principal
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// Extract the bearer token from an Authorization header value
fn extract_bearer(header_value: Option<&str>) -> Result<&str, Error> {
    let value = header_value
        .ok_or_else(|| Error::Unauthorized("Missing authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or_else(|| {
            Error::Unauthorized("Invalid authorization format, expected 'Bearer <token>'".to_string())
        })
}

/// Middleware requiring a valid bearer token on every request
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = extract_bearer(header_value)?;
    if token != state.config.api_token {
        return Err(Error::Unauthorized("Invalid bearer token".to_string()));
    }

    request
        .extensions_mut()
        .insert(AuthUser(state.config.api_actor.clone()));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_valid() {
        assert_eq!(extract_bearer(Some("Bearer secret")).unwrap(), "secret");
    }

    #[test]
    fn test_extract_bearer_lowercase_scheme() {
        assert_eq!(extract_bearer(Some("bearer secret")).unwrap(), "secret");
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        assert!(matches!(
            extract_bearer(None),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        assert!(matches!(
            extract_bearer(Some("Basic abc123")),
            Err(Error::Unauthorized(_))
        ));
    }
}
