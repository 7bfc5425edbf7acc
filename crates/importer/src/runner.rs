//! Runs the selected imports one after another.

use tcpbi_pipeline::{run_import, ImportSummary, Importer};

use crate::catalog::CatalogEntry;

/// Per-import outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<(&'static str, ImportSummary)>,
    pub failed: Vec<&'static str>,
}

impl RunReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every entry in order. A failed import is reported and the next one
/// still runs; each import has its own context.
pub async fn run_all(importer: &Importer, entries: &[CatalogEntry]) -> RunReport {
    let mut report = RunReport::default();

    for entry in entries {
        tracing::info!(dataset = entry.key, "{}:", entry.title);

        match run_import(importer, &entry.request()).await {
            Ok(summary) => {
                tracing::debug!(
                    dataset = entry.key,
                    created = summary.dataset_created,
                    rows = summary.rows_loaded,
                    "Import finished"
                );
                report.succeeded.push((entry.key, summary));
            }
            Err(e) => {
                tracing::error!(dataset = entry.key, error = %e, "Import failed");
                report.failed.push(entry.key);
            }
        }
    }

    report
}
