use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::jwt::verify_token;
use crate::config::Config;

/// The signed-in member, taken from `Authorization: Bearer <jwt>`
///
/// Any state exposing `Arc<Config>` can use it; the token is checked
/// against `Config::jwt_secret`.
///
/// ```rust,ignore
/// async fn my_notifications(JwtAuth(member): JwtAuth) -> String {
///     member.to_string()
/// }
/// ```
pub struct JwtAuth(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let config = Arc::<Config>::from_ref(state);

        verify_token(token, &config.jwt_secret)
            .map(|claims| JwtAuth(claims.sub))
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                ApiError::unauthorized("Invalid or expired token")
            })
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Malformed authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Expected a Bearer token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(bearer_token(&headers).is_err());
        assert!(bearer_token(&HeaderMap::new()).is_err());
    }
}
