//! time cockpit web API: token acquisition and TCQL queries.

use reqwest::header::HeaderMap;
use tcpbi_core::config::Endpoints;
use tcpbi_core::dataset::QuerySpec;

use crate::error::ClientError;
use crate::response::RawResponse;

pub struct TimeCockpitClient {
    client: reqwest::Client,
    api_url: String,
}

impl TimeCockpitClient {
    pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
        Self {
            client,
            api_url: endpoints.tc_api_url.clone(),
        }
    }

    /// `GET /token` with HTTP basic auth. The body is the token itself.
    pub async fn request_token(
        &self,
        user: &str,
        password: &str,
    ) -> Result<RawResponse, ClientError> {
        tracing::debug!(user, "Requesting time cockpit token");
        let response = self
            .client
            .get(format!("{}/token", self.api_url))
            .basic_auth(user, Some(password))
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }

    /// `POST /select` with `{ "query": ... }`. A successful body carries the
    /// result rows in `value`.
    pub async fn select(
        &self,
        headers: &HeaderMap,
        query: &QuerySpec,
    ) -> Result<RawResponse, ClientError> {
        let body = serde_json::json!({ "query": query });
        let response = self
            .client
            .post(format!("{}/select", self.api_url))
            .headers(headers.clone())
            .json(&body)
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }
}

/// Extract the token from a `/token` response body.
///
/// The body is normally the bare token. When the service labels it as JSON
/// it arrives as a string literal and is unquoted.
pub fn token_from_body(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(token)) => token,
        _ => trimmed.to_string(),
    }
}
