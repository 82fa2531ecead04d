//! Request inspection helpers.
//!
//! # Responsibilities
//! - Decide whether a request is a fetch-tool discovery query
//! - Work out the host name to echo back in the import path
//!
//! # Design Decisions
//! - A malformed query string is not an error; it just is not a discovery query
//! - Only the first `go-get` value counts

use axum::http::{header, HeaderMap, Uri};

/// Query parameter set by the fetch tool.
pub const DISCOVERY_PARAM: &str = "go-get";

/// True when the query carries `go-get=1`.
pub fn is_discovery(uri: &Uri) -> bool {
    let Some(query) = uri.query() else {
        return false;
    };
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == DISCOVERY_PARAM)
        .is_some_and(|(_, v)| v == "1")
}

/// The `Host` header, falling back to the URI authority (HTTP/2).
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> &'a str {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_discovery() {
        assert!(is_discovery(&"/net/lldp?go-get=1".parse().unwrap()));
        assert!(is_discovery(&"/x?a=b&go-get=1".parse().unwrap()));
        assert!(!is_discovery(&"/net/lldp".parse().unwrap()));
        assert!(!is_discovery(&"/net/lldp?go-get=0".parse().unwrap()));
        assert!(!is_discovery(&"/net/lldp?go-get=0&go-get=1".parse().unwrap()));
    }

    #[test]
    fn test_request_host() {
        let uri: Uri = "http://authority.example/x".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(request_host(&headers, &uri), "authority.example");

        headers.insert(header::HOST, HeaderValue::from_static("example.com"));
        assert_eq!(request_host(&headers, &uri), "example.com");

        let bare: Uri = "/x".parse().unwrap();
        assert_eq!(request_host(&HeaderMap::new(), &bare), "");
    }
}
