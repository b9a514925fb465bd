use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, OriginalUri, Query, Request, State},
    http::{
        header::{AUTHORIZATION, USER_AGENT},
        HeaderMap, Uri,
    },
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use super::client_ip;
use crate::api::errors::ApiError;
use crate::auth::api_key::{key_prefix, verify_api_key};
use crate::domain::api_key::{ApiKey, ApiKeyStatus, UsageEvent};
use crate::domain::errors::DomainError;
use crate::domain::repositories::ApiKeyRepository;
use crate::infrastructure::repositories::PostgresApiKeyRepository;
use crate::state::AppState;

/// Guard for routes served to third-party applications
///
/// Resolves the presented key, checks its status, expiry and endpoint
/// allow-list, spends one unit of its daily quota and records the request
/// once the handler has answered. The resolved [`ApiKey`] is placed in the
/// request extensions.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let started = Instant::now();
    let presented = presented_key(request.headers(), request.uri())
        .ok_or_else(|| ApiError::unauthorized("API key required"))?;

    let repo = PostgresApiKeyRepository::new(state.pool.clone());
    let mut key = resolve_key(&repo, &presented).await?;

    match key.status() {
        ApiKeyStatus::Active => {}
        ApiKeyStatus::Revoked => return Err(ApiError::unauthorized("API key has been revoked")),
        ApiKeyStatus::Expired => return Err(ApiError::unauthorized("API key has expired")),
    }

    let now = Utc::now();
    if key.is_expired(now) {
        key.mark_expired();
        repo.save(&key).await?;
        tracing::info!(api_key_id = %key.id(), "API key expired");
        return Err(ApiError::unauthorized("API key has expired"));
    }

    // Nested routers see a stripped URI; match against the full path
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    if !key.allows_endpoint(&path) {
        return Err(ApiError::unauthorized("Access denied for this endpoint"));
    }

    if !repo.consume_quota(key.id(), now.date_naive()).await? {
        return Err(DomainError::QuotaExceeded("Daily request limit exceeded".into()).into());
    }

    let method = request.method().to_string();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip_address = client_ip(request.headers(), peer);
    let key_id = key.id();

    request.extensions_mut().insert(key);
    let response = next.run(request).await;

    let event = UsageEvent {
        endpoint: path,
        method,
        status_code: response.status().as_u16(),
        user_agent,
        ip_address,
        response_time_ms: i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX),
    };
    tokio::spawn(async move {
        if let Err(e) = repo.record_usage(key_id, &event).await {
            tracing::warn!(api_key_id = %key_id, error = %e, "Failed to record API key usage");
        }
    });

    Ok(response)
}

/// Reads the key from `Authorization: Bearer`, then `X-API-Key`, then `?api_key=`
fn presented_key(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let header = headers.get("x-api-key").and_then(|value| value.to_str().ok());

    bearer
        .or(header)
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| {
            Query::<HashMap<String, String>>::try_from_uri(uri)
                .ok()
                .and_then(|Query(mut params)| params.remove("api_key"))
                .filter(|key| !key.is_empty())
        })
}

async fn resolve_key(repo: &PostgresApiKeyRepository, presented: &str) -> Result<ApiKey, ApiError> {
    let prefix = key_prefix(presented).ok_or_else(|| ApiError::unauthorized("Invalid API key"))?;

    let candidates = repo.find_by_prefix(prefix).await?;
    let presented = presented.to_string();

    // bcrypt verification stays off the async workers
    tokio::task::spawn_blocking(move || {
        candidates
            .into_iter()
            .find(|candidate| verify_api_key(&presented, candidate.key_hash()))
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "API key verification task failed");
        ApiError::internal_server_error("Internal server error")
    })?
    .ok_or_else(|| ApiError::unauthorized("Invalid API key"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer ak_bearer"));
        headers.insert("x-api-key", HeaderValue::from_static("ak_header"));
        let uri: Uri = "/api/external/search?api_key=ak_query".parse().unwrap();

        assert_eq!(presented_key(&headers, &uri).as_deref(), Some("ak_bearer"));
    }

    #[test]
    fn header_then_query() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("ak_header"));
        let uri: Uri = "/api/external/search?api_key=ak_query".parse().unwrap();
        assert_eq!(presented_key(&headers, &uri).as_deref(), Some("ak_header"));

        assert_eq!(
            presented_key(&HeaderMap::new(), &uri).as_deref(),
            Some("ak_query")
        );
    }

    #[test]
    fn nothing_presented() {
        let uri: Uri = "/api/external/dashboard".parse().unwrap();
        assert_eq!(presented_key(&HeaderMap::new(), &uri), None);
    }
}
