/// Errors raised before a service produced any HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body read, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A request URL could not be assembled from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
