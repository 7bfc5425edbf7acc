//! Which catalogue entries a run imports.

use tcpbi_core::error::CoreError;

use crate::catalog::{self, CatalogEntry};

/// Imported when `IMPORT_DATASETS` is unset.
pub const DEFAULT_DATASETS: &str = "invoices";

/// The imports selected for this run, in the order given.
///
/// | Env Var           | Default    |
/// |-------------------|------------|
/// | `IMPORT_DATASETS` | `invoices` |
///
/// The value is a comma-separated list of catalogue keys (case-insensitive).
/// Repeated keys run once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSelection {
    pub entries: Vec<CatalogEntry>,
}

impl ImportSelection {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("IMPORT_DATASETS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASETS.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for key in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let entry = catalog::lookup(key).ok_or_else(|| {
                let known: Vec<&str> = catalog::ENTRIES.iter().map(|e| e.key).collect();
                CoreError::InvalidConfig(format!(
                    "IMPORT_DATASETS: unknown dataset `{key}` (known: {})",
                    known.join(", ")
                ))
            })?;
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }

        if entries.is_empty() {
            return Err(CoreError::InvalidConfig(
                "IMPORT_DATASETS selects no dataset".into(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.key).collect()
    }
}
