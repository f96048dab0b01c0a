//! Bearer-token authentication for the REST API

mod jwt;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

pub use jwt::{issue_user_jwt, verify_user_jwt};

use crate::error::ApiError;
use crate::state::AppState;

/// The user making the request, taken from a verified JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let id = verify_user_jwt(state.jwt_secret(), token).map_err(|err| {
            tracing::debug!("Rejected bearer token: {}", err);
            ApiError::Unauthorized(err)
        })?;
        Ok(Self { id })
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;
    let auth_value = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;
    auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Authorization must be Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_static("Bearer secret-token"),
        );

        let token = extract_bearer_token(&headers).unwrap();
        assert_eq!(token, "secret-token");
    }

    #[test]
    fn rejects_when_authorization_header_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_when_scheme_is_not_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_static("Basic secret-token"),
        );
        assert!(extract_bearer_token(&headers).is_err());
    }
}
