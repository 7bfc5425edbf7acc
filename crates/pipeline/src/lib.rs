//! The time cockpit to Power BI import pipeline.
//!
//! One import is a fixed waterfall of dependent calls:
//!
//! 1. both access tokens, requested concurrently ([`stages::authenticate`])
//! 2. header assembly ([`context::ImportContext::assemble`])
//! 3. TCQL query against time cockpit ([`stages::fetch_data`])
//! 4. dataset lookup by name ([`stages::resolve_dataset`])
//! 5. dataset creation when the lookup found nothing ([`stages::provision_dataset`])
//! 6. purge of the target table ([`stages::purge_table`])
//! 7. upload of the fetched rows ([`stages::load_table`])
//!
//! Every response passes through [`response::classify`]; the first
//! unexpected status or transport failure aborts the remaining steps.
//! Side effects already applied (a created dataset, a purged table) are
//! left in place.

pub mod context;
pub mod error;
pub mod importer;
pub mod response;
pub mod stages;

pub use error::{ImportError, StageFailure};
pub use importer::{run_import, ImportSummary, Importer};
