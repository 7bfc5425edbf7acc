//! Azure AD token endpoint (OAuth2 resource owner password grant).

use tcpbi_core::config::{Credentials, Endpoints};

use crate::error::ClientError;
use crate::response::RawResponse;

/// Requests Power BI access tokens from Azure AD.
pub struct AzureAdClient {
    client: reqwest::Client,
    authority_url: String,
    resource: String,
}

impl AzureAdClient {
    pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
        Self {
            client,
            authority_url: endpoints.authority_url.clone(),
            resource: endpoints.powerbi_resource.clone(),
        }
    }

    /// `POST {authority}/{tenant}/oauth2/token` with a form-encoded password
    /// grant. A successful body carries `access_token`.
    pub async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<RawResponse, ClientError> {
        let url = format!("{}/{}/oauth2/token", self.authority_url, credentials.tenant);
        let form = [
            ("grant_type", "password"),
            ("username", credentials.powerbi_user.as_str()),
            ("password", credentials.powerbi_password.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("resource", self.resource.as_str()),
        ];

        tracing::debug!(tenant = %credentials.tenant, "Requesting Azure AD token");
        let response = self.client.post(url).form(&form).send().await?;
        Ok(RawResponse::read(response).await?)
    }
}
