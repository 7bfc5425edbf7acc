//! The individual import stages. Each takes the context in one state and
//! returns it in the next, or the error that ends the import.

use tcpbi_clients::powerbi::DatasetSummary;
use tcpbi_clients::timecockpit::token_from_body;
use tcpbi_core::dataset::{DatasetDefinition, QuerySpec};
use tcpbi_core::stage::Stage;
use tcpbi_core::types::{DatasetId, Row};

use crate::context::{AuthTokens, Authenticated, Fetched, ImportContext, Provisioned, Resolved};
use crate::error::ImportError;
use crate::importer::Importer;
use crate::response::{classify, ignore_body};

/// Request both tokens at once and wait for both.
///
/// The two requests are polled together on the current task. The first
/// failure ends the stage; the other request is dropped.
pub async fn authenticate(importer: &Importer) -> Result<AuthTokens, ImportError> {
    let credentials = importer.credentials();

    let powerbi = async {
        let result = importer.azure_ad().request_token(credentials).await;
        classify(Stage::StoreToken, result, |r| r.json_field::<String>("access_token"))
    };
    let timecockpit = async {
        let result = importer
            .timecockpit()
            .request_token(&credentials.tc_user, &credentials.tc_password)
            .await;
        classify(Stage::QueryServiceToken, result, |r| Ok(token_from_body(&r.text)))
    };

    let (powerbi, timecockpit) = tokio::try_join!(powerbi, timecockpit)?;
    Ok(AuthTokens {
        powerbi,
        timecockpit,
    })
}

/// Run the TCQL query and keep its `value` rows as returned.
pub async fn fetch_data(
    importer: &Importer,
    ctx: ImportContext<Authenticated>,
    query: &QuerySpec,
) -> Result<ImportContext<Fetched>, ImportError> {
    let result = importer
        .timecockpit()
        .select(ctx.timecockpit_headers(), query)
        .await;
    let rows: Vec<Row> = classify(Stage::FetchData, result, |r| r.json_field("value"))?;

    tracing::debug!(rows = rows.len(), "Fetched rows from time cockpit");
    Ok(ctx.with_rows(rows))
}

/// Look the target dataset up by name. Not finding it is a valid outcome.
pub async fn resolve_dataset(
    importer: &Importer,
    ctx: ImportContext<Fetched>,
    name: &str,
) -> Result<ImportContext<Resolved>, ImportError> {
    let result = importer.powerbi().list_datasets(ctx.powerbi_headers()).await;
    let datasets: Vec<DatasetSummary> =
        classify(Stage::ResolveDataset, result, |r| r.json_field("value"))?;

    let dataset_id = find_dataset_by_name(&datasets, name);
    match &dataset_id {
        Some(id) => tracing::info!(dataset = name, dataset_id = %id, "Found existing dataset"),
        None => tracing::info!(dataset = name, "Dataset does not exist yet"),
    }
    Ok(ctx.with_resolved(dataset_id))
}

/// Create the dataset unless the lookup already found one.
///
/// Makes no call at all when the dataset exists.
pub async fn provision_dataset(
    importer: &Importer,
    ctx: ImportContext<Resolved>,
    definition: &DatasetDefinition,
) -> Result<ImportContext<Provisioned>, ImportError> {
    let ctx = match ctx.into_existing() {
        Ok(existing) => return Ok(existing),
        Err(missing) => missing,
    };

    let result = importer
        .powerbi()
        .create_dataset(ctx.powerbi_headers(), definition)
        .await;
    let dataset_id: DatasetId = classify(Stage::CreateDataset, result, |r| r.json_field("id"))?;

    tracing::info!(dataset = %definition.name, dataset_id = %dataset_id, "Created dataset");
    Ok(ctx.with_created(dataset_id))
}

/// Delete every row of the target table.
pub async fn purge_table(
    importer: &Importer,
    ctx: &ImportContext<Provisioned>,
    table: &str,
) -> Result<(), ImportError> {
    let result = importer
        .powerbi()
        .delete_rows(ctx.powerbi_headers(), ctx.dataset_id(), table)
        .await;
    classify(Stage::PurgeTable, result, ignore_body)
}

/// Push the fetched rows into the target table. Returns the row count.
pub async fn load_table(
    importer: &Importer,
    ctx: &ImportContext<Provisioned>,
    table: &str,
) -> Result<usize, ImportError> {
    let result = importer
        .powerbi()
        .add_rows(ctx.powerbi_headers(), ctx.dataset_id(), table, ctx.rows())
        .await;
    classify(Stage::LoadTable, result, ignore_body)?;
    Ok(ctx.rows().len())
}

/// Id of the first dataset whose name matches exactly (case-sensitive).
pub fn find_dataset_by_name(datasets: &[DatasetSummary], name: &str) -> Option<DatasetId> {
    datasets
        .iter()
        .find(|dataset| dataset.name == name)
        .map(|dataset| dataset.id.clone())
}
