//! FILENAME: app/src/lib.rs
// PURPOSE: Application state and command surface for the baseline workbench.
// CONTEXT: The frontend drives these commands; each command locks only the
// state it needs and never holds a lock across a network call.

use baseline_engine::{BaselineResult, GrandTotals};
use engine::ColumnConfiguration;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

pub mod column_selection;
pub mod commands;
pub mod error;
pub mod logging;

pub use column_selection::{ColumnSelection, SelectionError};
pub use commands::*;
pub use error::AppError;

// ============================================================================
// LOAD STATE
// ============================================================================

/// Progress of the worksheet metadata fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LoadState {
    Idle,
    Loading,
    Ready { column_count: usize },
    Failed { message: String, retryable: bool },
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Output of one baseline run against an applied configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineReport {
    /// Version of the configuration the report was computed from.
    pub configuration_version: u64,
    pub query: String,
    pub row_count: usize,
    pub results: Vec<BaselineResult>,
    pub totals: GrandTotals,
}

/// An applied configuration together with the version it was applied as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedConfiguration {
    pub version: u64,
    pub configuration: ColumnConfiguration,
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct AppState {
    /// Working selection edited by the user
    pub selection: Mutex<ColumnSelection>,
    /// Status of the column metadata fetch
    pub load_state: Mutex<LoadState>,
    /// Last applied configuration and its version; replaced wholesale on
    /// every apply. Lock before `last_report` when both are needed.
    pub applied: Mutex<Option<AppliedConfiguration>>,
    /// Report from the last baseline run for the current configuration
    pub last_report: Mutex<Option<BaselineReport>>,
}

pub fn create_app_state() -> AppState {
    log_info!("SYS", "Creating AppState");
    AppState {
        selection: Mutex::new(ColumnSelection::new()),
        load_state: Mutex::new(LoadState::Idle),
        applied: Mutex::new(None),
        last_report: Mutex::new(None),
    }
}

/// Locks a state member, recovering the guard from a poisoned lock.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
