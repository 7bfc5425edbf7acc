//! `tcpbi-importer` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod catalog;
pub mod config;
pub mod runner;
