//! Domain types shared by the time cockpit to Power BI importer.
//!
//! Nothing in this crate performs I/O: it holds configuration, the dataset
//! and query definitions handed to the pipeline, and the stage catalogue.

pub mod config;
pub mod dataset;
pub mod error;
pub mod stage;
pub mod types;
