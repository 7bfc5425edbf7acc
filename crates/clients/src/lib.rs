//! HTTP clients for the services an import talks to.
//!
//! - [`azure_ad`]: password-grant token for the Power BI API.
//! - [`timecockpit`]: basic-auth token and TCQL query execution.
//! - [`powerbi`]: dataset listing/creation and table row operations.
//!
//! Clients never judge status codes. Each call returns a [`RawResponse`]
//! (status plus body text) and the caller decides whether the status is the
//! one it expected.

pub mod azure_ad;
pub mod error;
pub mod headers;
pub mod powerbi;
pub mod response;
pub mod timecockpit;

pub use error::ClientError;
pub use response::RawResponse;

/// Build the HTTP client shared by all service clients.
///
/// No request timeout is set: a stalled call stalls the import.
pub fn build_http_client() -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("tcpbi-importer/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
