// Client identity - who a request counts as for votes and bans.

use axum::http::HeaderMap;
use std::net::SocketAddr;

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// First address in `X-Forwarded-For`, trimmed, or the peer IP when the
/// header is missing or empty. Not validated; it's only used as a key.
pub fn client_identity(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| value.split(',').next().unwrap_or_default().trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "192.168.1.20:51234".parse().unwrap()
    }

    #[test]
    fn test_uses_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED_FOR,
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1, 10.0.0.2"),
        );

        assert_eq!(client_identity(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn test_falls_back_to_peer_ip() {
        let headers = HeaderMap::new();
        assert_eq!(client_identity(&headers, peer()), "192.168.1.20");

        let mut empty = HeaderMap::new();
        empty.insert(FORWARDED_FOR, HeaderValue::from_static(""));
        assert_eq!(client_identity(&empty, peer()), "192.168.1.20");
    }

    #[test]
    fn test_identity_is_opaque() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("not-an-ip"));

        assert_eq!(client_identity(&headers, peer()), "not-an-ip");
    }
}
