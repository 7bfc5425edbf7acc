//! `tcpbi-importer` -- copies time cockpit query results into Power BI.
//!
//! For every selected catalogue entry: fetch both access tokens, run the
//! TCQL query, create the Power BI dataset if needed, clear the target table
//! and push the rows. See [`tcpbi_core::config`] for the credential and
//! endpoint variables and [`tcpbi_importer::config`] for `IMPORT_DATASETS`.
//!
//! Exits with status 1 when configuration is incomplete or any import fails.

use tcpbi_core::config::{Credentials, Endpoints};
use tcpbi_importer::config::ImportSelection;
use tcpbi_importer::runner;
use tcpbi_pipeline::Importer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcpbi_importer=info,tcpbi_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("*** Time Cockpit to Power BI Importer ***");

    let credentials = Credentials::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Cannot start importer");
        std::process::exit(1);
    });

    let selection = ImportSelection::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Cannot start importer");
        std::process::exit(1);
    });

    let endpoints = Endpoints::from_env();
    tracing::debug!(?endpoints, datasets = ?selection.keys(), "Configuration loaded");

    let importer = Importer::new(credentials, &endpoints).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    let report = runner::run_all(&importer, &selection.entries).await;

    if !report.all_succeeded() {
        tracing::error!(failed = ?report.failed, "Some imports failed");
        std::process::exit(1);
    }
}
