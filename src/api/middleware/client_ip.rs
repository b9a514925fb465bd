use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Identifies the calling client
///
/// The first `X-Forwarded-For` entry wins when present, otherwise the peer
/// address of the connection.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer = "127.0.0.1:4000".parse().ok();
        assert_eq!(client_ip(&headers, peer).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn falls_back_to_peer() {
        let peer = "192.0.2.10:51000".parse().ok();
        assert_eq!(
            client_ip(&HeaderMap::new(), peer).as_deref(),
            Some("192.0.2.10")
        );
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}
