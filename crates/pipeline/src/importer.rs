//! Entry point of the pipeline: [`Importer`] holds the clients and
//! credentials, [`run_import`] drives one import through every stage.

use tcpbi_clients::azure_ad::AzureAdClient;
use tcpbi_clients::powerbi::PowerBiClient;
use tcpbi_clients::timecockpit::TimeCockpitClient;
use tcpbi_clients::{build_http_client, ClientError};
use tcpbi_core::config::{Credentials, Endpoints};
use tcpbi_core::dataset::ImportRequest;
use tcpbi_core::types::DatasetId;

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::stages;

/// Clients and credentials needed to run imports.
///
/// Immutable once built. Imports run through the same `Importer` each get
/// their own context and share nothing else.
pub struct Importer {
    credentials: Credentials,
    azure_ad: AzureAdClient,
    timecockpit: TimeCockpitClient,
    powerbi: PowerBiClient,
}

impl Importer {
    pub fn new(credentials: Credentials, endpoints: &Endpoints) -> Result<Self, ClientError> {
        Ok(Self::with_client(build_http_client()?, credentials, endpoints))
    }

    /// Build an importer reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        credentials: Credentials,
        endpoints: &Endpoints,
    ) -> Self {
        Self {
            credentials,
            azure_ad: AzureAdClient::new(client.clone(), endpoints),
            timecockpit: TimeCockpitClient::new(client.clone(), endpoints),
            powerbi: PowerBiClient::new(client, endpoints),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn azure_ad(&self) -> &AzureAdClient {
        &self.azure_ad
    }

    pub fn timecockpit(&self) -> &TimeCockpitClient {
        &self.timecockpit
    }

    pub fn powerbi(&self) -> &PowerBiClient {
        &self.powerbi
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub dataset_id: DatasetId,
    /// The dataset did not exist and was created by this import.
    pub dataset_created: bool,
    pub rows_loaded: usize,
}

/// Replace the contents of the request's target table with the result of
/// its query.
///
/// Stops at the first failing stage. Nothing is undone on failure: a dataset
/// created or a table purged before the failure stays that way.
pub async fn run_import(
    importer: &Importer,
    request: &ImportRequest,
) -> Result<ImportSummary, ImportError> {
    request.validate()?;
    let table = request.target_table_name()?;
    let dataset = &request.dataset;

    tracing::info!(dataset = %dataset.name, table, "Starting import");

    let tokens = stages::authenticate(importer).await?;
    let ctx = ImportContext::assemble(&tokens)?;
    let ctx = stages::fetch_data(importer, ctx, &request.query).await?;
    let ctx = stages::resolve_dataset(importer, ctx, &dataset.name).await?;
    let ctx = stages::provision_dataset(importer, ctx, dataset).await?;
    stages::purge_table(importer, &ctx, table).await?;
    let rows_loaded = stages::load_table(importer, &ctx, table).await?;

    tracing::info!(
        dataset = %dataset.name,
        dataset_id = %ctx.dataset_id(),
        rows = rows_loaded,
        "Import succeeded."
    );

    Ok(ImportSummary {
        dataset_id: ctx.dataset_id().to_string(),
        dataset_created: ctx.created(),
        rows_loaded,
    })
}
