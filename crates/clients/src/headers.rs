//! Header sets attached to every authorized request.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

/// The token contains bytes that cannot appear in an HTTP header.
#[derive(Debug, thiserror::Error)]
#[error("bearer token is not a valid header value")]
pub struct InvalidToken;

/// Build `Accept`, `Content-Type` (both JSON) and `Authorization: Bearer`.
pub fn bearer_headers(token: &str) -> Result<HeaderMap, InvalidToken> {
    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| InvalidToken)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, authorization);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_three_headers() {
        let headers = bearer_headers("tok-123").unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer tok-123");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn rejects_token_with_newline() {
        assert!(bearer_headers("abc\r\nX-Injected: 1").is_err());
    }
}
