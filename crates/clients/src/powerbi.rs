//! Power BI REST API client (push datasets).
//!
//! Wraps the four calls an import needs: list datasets, create a dataset,
//! clear a table, and push rows into a table.

use reqwest::header::HeaderMap;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tcpbi_core::config::Endpoints;
use tcpbi_core::dataset::DatasetDefinition;
use tcpbi_core::types::{DatasetId, Row};

use crate::error::ClientError;
use crate::response::RawResponse;

/// An entry of the `GET /datasets` listing. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub name: String,
}

/// Body of `POST .../rows`.
#[derive(Debug, Serialize)]
struct RowsPayload<'a> {
    rows: &'a [Row],
}

pub struct PowerBiClient {
    client: reqwest::Client,
    api_url: String,
}

impl PowerBiClient {
    pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
        Self {
            client,
            api_url: endpoints.powerbi_api_url.clone(),
        }
    }

    /// `GET /datasets`. A successful body carries the list in `value`.
    pub async fn list_datasets(&self, headers: &HeaderMap) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/datasets", self.api_url))
            .headers(headers.clone())
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }

    /// `POST /datasets?defaultRetentionPolicy=None` with the full definition.
    /// Power BI answers `201 Created` with the new `id`.
    pub async fn create_dataset(
        &self,
        headers: &HeaderMap,
        dataset: &DatasetDefinition,
    ) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/datasets", self.api_url))
            .query(&[("defaultRetentionPolicy", "None")])
            .headers(headers.clone())
            .json(dataset)
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }

    /// `DELETE /datasets/{id}/tables/{table}/rows`, no body.
    pub async fn delete_rows(
        &self,
        headers: &HeaderMap,
        dataset_id: &str,
        table: &str,
    ) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .delete(self.rows_url(dataset_id, table)?)
            .headers(headers.clone())
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }

    /// `POST /datasets/{id}/tables/{table}/rows` with `{ "rows": [...] }`.
    pub async fn add_rows(
        &self,
        headers: &HeaderMap,
        dataset_id: &str,
        table: &str,
        rows: &[Row],
    ) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .post(self.rows_url(dataset_id, table)?)
            .headers(headers.clone())
            .json(&RowsPayload { rows })
            .send()
            .await?;
        Ok(RawResponse::read(response).await?)
    }

    /// Rows endpoint of one table. Id and table name are percent-encoded as
    /// path segments.
    fn rows_url(&self, dataset_id: &str, table: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(["datasets", dataset_id, "tables", table, "rows"]);
        Ok(url)
    }
}
