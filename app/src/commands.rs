//! FILENAME: app/src/commands.rs
//! PURPOSE: Commands invoked by the frontend.
//! CONTEXT: Selection commands are synchronous. Loading columns and running
//! the baseline query await the worksheet client.

use crate::{lock, log_enter, log_exit, log_info, log_warn};
use crate::{AppError, AppState, AppliedConfiguration, BaselineReport, LoadState};
use baseline_engine::{calculate_with_definition, grand_totals, BaselineDefinition};
use engine::{Column, ColumnConfiguration, DateAggregation};
use serde::{Deserialize, Serialize};
use worksheet_client::WorksheetClient;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Everything the selection form needs to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub load_state: LoadState,
    pub available: Vec<Column>,
    pub metrics: Vec<Column>,
    pub dimensions: Vec<Column>,
    pub primary_metric: Option<String>,
    pub baseline_metric: Option<String>,
    pub primary_dimension: Option<String>,
    pub date_aggregation: Option<DateAggregation>,
    /// Options offered for the date aggregation picker
    pub date_aggregation_options: Vec<DateAggregation>,
}

// ============================================================================
// LOADING
// ============================================================================

/// Fetches the worksheet columns and installs them in the selection.
/// On failure the load state becomes `Failed` and the error is returned.
pub async fn load_columns(state: &AppState, client: &WorksheetClient) -> Result<usize, AppError> {
    log_enter!("LOAD", "load_columns", "worksheet={}", client.config().worksheet_id);
    *lock(&state.load_state) = LoadState::Loading;

    match client.export_columns().await {
        Ok(columns) => {
            let count = columns.len();
            lock(&state.selection).set_columns(columns);
            *lock(&state.load_state) = LoadState::Ready { column_count: count };
            log_exit!("LOAD", "load_columns", "columns={}", count);
            Ok(count)
        }
        Err(e) => {
            let err = AppError::from(e);
            log_warn!("LOAD", "load_columns failed: {}", err);
            *lock(&state.load_state) = LoadState::Failed {
                message: err.to_string(),
                retryable: err.is_retryable(),
            };
            Err(err)
        }
    }
}

/// Re-issues the column fetch unless columns are already loaded.
pub async fn retry_load(state: &AppState, client: &WorksheetClient) -> Result<usize, AppError> {
    let current = lock(&state.load_state).clone();
    if let LoadState::Ready { column_count } = current {
        log_info!("LOAD", "retry_load skipped, {} columns already loaded", column_count);
        return Ok(column_count);
    }
    log_info!("LOAD", "retry_load from {:?}", current);
    load_columns(state, client).await
}

pub fn get_load_state(state: &AppState) -> LoadState {
    lock(&state.load_state).clone()
}

// ============================================================================
// SELECTION
// ============================================================================

pub fn toggle_metric(state: &AppState, name: &str) -> Result<bool, AppError> {
    let selected = lock(&state.selection).toggle_metric(name)?;
    log_info!("SEL", "toggle_metric {} -> {}", name, selected);
    Ok(selected)
}

pub fn toggle_dimension(state: &AppState, name: &str) -> Result<bool, AppError> {
    let selected = lock(&state.selection).toggle_dimension(name)?;
    log_info!("SEL", "toggle_dimension {} -> {}", name, selected);
    Ok(selected)
}

pub fn set_primary_metric(state: &AppState, name: &str) -> Result<(), AppError> {
    lock(&state.selection).set_primary_metric(name)?;
    log_info!("SEL", "set_primary_metric {}", name);
    Ok(())
}

pub fn set_baseline_metric(state: &AppState, name: &str) -> Result<(), AppError> {
    lock(&state.selection).set_baseline_metric(name)?;
    log_info!("SEL", "set_baseline_metric {}", name);
    Ok(())
}

pub fn set_primary_dimension(state: &AppState, name: &str) -> Result<(), AppError> {
    lock(&state.selection).set_primary_dimension(name)?;
    log_info!("SEL", "set_primary_dimension {}", name);
    Ok(())
}

/// Sets the date aggregation from its name; an empty string clears it.
pub fn set_date_aggregation(state: &AppState, value: &str) -> Result<Option<DateAggregation>, AppError> {
    let aggregation = if value.trim().is_empty() {
        None
    } else {
        Some(value.parse::<DateAggregation>()?)
    };
    lock(&state.selection).set_date_aggregation(aggregation);
    log_info!("SEL", "set_date_aggregation {:?}", aggregation);
    Ok(aggregation)
}

pub fn get_selection_view(state: &AppState) -> SelectionView {
    let load_state = lock(&state.load_state).clone();
    let selection = lock(&state.selection);
    SelectionView {
        load_state,
        available: selection.available_columns().into_iter().cloned().collect(),
        metrics: selection.metrics().to_vec(),
        dimensions: selection.dimensions().to_vec(),
        primary_metric: selection.primary_metric().map(|c| c.name.clone()),
        baseline_metric: selection.baseline_metric().map(|c| c.name.clone()),
        primary_dimension: selection.primary_dimension().map(|c| c.name.clone()),
        date_aggregation: selection.date_aggregation(),
        date_aggregation_options: DateAggregation::ALL.to_vec(),
    }
}

// ============================================================================
// APPLY
// ============================================================================

/// Snapshots the selection and replaces the applied configuration.
/// Any report computed for the previous configuration is discarded.
pub fn apply_configuration(state: &AppState) -> Result<ColumnConfiguration, AppError> {
    let config = lock(&state.selection).snapshot()?;

    let version = {
        let mut applied = lock(&state.applied);
        let version = applied.as_ref().map_or(0, |a| a.version) + 1;
        *applied = Some(AppliedConfiguration {
            version,
            configuration: config.clone(),
        });
        *lock(&state.last_report) = None;
        version
    };

    log_info!(
        "SEL",
        "apply_configuration v{} metrics={} dimensions={}",
        version,
        config.metrics().len(),
        config.dimensions().len()
    );
    Ok(config)
}

pub fn get_applied_configuration(state: &AppState) -> Option<ColumnConfiguration> {
    lock(&state.applied).as_ref().map(|a| a.configuration.clone())
}

/// Version of the applied configuration; 0 before the first apply.
pub fn get_configuration_version(state: &AppState) -> u64 {
    lock(&state.applied).as_ref().map_or(0, |a| a.version)
}

// ============================================================================
// BASELINE
// ============================================================================

/// Fetches rows for the applied configuration and computes the comparison.
/// Missing designations are reported before any request is sent.
pub async fn run_baseline(state: &AppState, client: &WorksheetClient) -> Result<BaselineReport, AppError> {
    let AppliedConfiguration {
        version,
        configuration,
    } = lock(&state.applied).clone().ok_or(AppError::NotConfigured)?;
    let definition = BaselineDefinition::from_configuration(&configuration)?;
    let query = definition.query_string();

    log_enter!("BASELINE", "run_baseline", "v{} query={}", version, query);

    let rows = client.search_rows(&query, &definition.query_columns()).await?;
    let results = calculate_with_definition(&definition, &rows)?;

    let report = BaselineReport {
        configuration_version: version,
        query,
        row_count: rows.len(),
        totals: grand_totals(&results),
        results,
    };

    // A newer apply while the query was in flight makes this report stale.
    let applied = lock(&state.applied);
    if applied.as_ref().map(|a| a.version) == Some(version) {
        *lock(&state.last_report) = Some(report.clone());
    } else {
        log_warn!("BASELINE", "configuration changed during run, report v{} not stored", version);
    }
    drop(applied);

    log_exit!("BASELINE", "run_baseline", "groups={}", report.results.len());
    Ok(report)
}

pub fn get_last_report(state: &AppState) -> Option<BaselineReport> {
    lock(&state.last_report).clone()
}
