//! FILENAME: core/worksheet-client/src/lib.rs
//! Worksheet Client
//!
//! Talks to the analytics service REST API: exports worksheet metadata to
//! discover columns, and runs search-data queries to fetch rows.

mod client;
mod config;
mod error;
pub mod metadata;
pub mod search;

pub use client::WorksheetClient;
pub use config::ServiceConfig;
pub use error::ClientError;
pub use metadata::{columns_from_export, ExportDocument};
pub use search::{cell_from_json, SearchContent, SearchDataResponse};
