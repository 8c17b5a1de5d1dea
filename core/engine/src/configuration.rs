//! FILENAME: core/engine/src/configuration.rs
//! Column Configuration - The applied selection snapshot.
//!
//! A `ColumnConfiguration` is an immutable snapshot of user intent:
//! which columns are metrics, which are dimensions, and which of them are
//! designated primary/baseline. It is only built through `ColumnConfiguration::new`,
//! which enforces that every designation is drawn from its list.

use crate::column::{Column, DateAggregation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Violations of the configuration snapshot invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("primary metric '{0}' is not among the selected metrics")]
    PrimaryMetricNotSelected(String),

    #[error("baseline metric '{0}' is not among the selected metrics")]
    BaselineMetricNotSelected(String),

    #[error("primary dimension '{0}' is not among the selected dimensions")]
    PrimaryDimensionNotSelected(String),

    #[error("column '{0}' is selected as both a metric and a dimension")]
    ColumnInBothRoles(String),

    #[error("column '{0}' is selected more than once")]
    DuplicateColumn(String),
}

/// Unvalidated shape used for deserialization; converted through `new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumnConfiguration {
    #[serde(default)]
    metrics: Vec<Column>,
    #[serde(default)]
    dimensions: Vec<Column>,
    #[serde(default)]
    primary_metric: Option<Column>,
    #[serde(default)]
    baseline_metric: Option<Column>,
    #[serde(default)]
    primary_dimension: Option<Column>,
    #[serde(default)]
    date_aggregation: Option<DateAggregation>,
}

impl TryFrom<RawColumnConfiguration> for ColumnConfiguration {
    type Error = ConfigurationError;

    fn try_from(raw: RawColumnConfiguration) -> Result<Self, Self::Error> {
        ColumnConfiguration::new(
            raw.metrics,
            raw.dimensions,
            raw.primary_metric,
            raw.baseline_metric,
            raw.primary_dimension,
            raw.date_aggregation,
        )
    }
}

/// The applied column configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawColumnConfiguration")]
pub struct ColumnConfiguration {
    metrics: Vec<Column>,
    dimensions: Vec<Column>,
    primary_metric: Option<Column>,
    baseline_metric: Option<Column>,
    primary_dimension: Option<Column>,
    date_aggregation: Option<DateAggregation>,
}

impl ColumnConfiguration {
    /// Builds a snapshot, rejecting designations that are not drawn from
    /// their list and columns that appear in more than one role.
    pub fn new(
        metrics: Vec<Column>,
        dimensions: Vec<Column>,
        primary_metric: Option<Column>,
        baseline_metric: Option<Column>,
        primary_dimension: Option<Column>,
        date_aggregation: Option<DateAggregation>,
    ) -> Result<Self, ConfigurationError> {
        for (idx, col) in metrics.iter().enumerate() {
            if metrics[..idx].iter().any(|m| m.name == col.name) {
                return Err(ConfigurationError::DuplicateColumn(col.name.clone()));
            }
            if dimensions.iter().any(|d| d.name == col.name) {
                return Err(ConfigurationError::ColumnInBothRoles(col.name.clone()));
            }
        }
        for (idx, col) in dimensions.iter().enumerate() {
            if dimensions[..idx].iter().any(|d| d.name == col.name) {
                return Err(ConfigurationError::DuplicateColumn(col.name.clone()));
            }
        }

        if let Some(pm) = &primary_metric {
            if !metrics.contains(pm) {
                return Err(ConfigurationError::PrimaryMetricNotSelected(pm.name.clone()));
            }
        }
        if let Some(bm) = &baseline_metric {
            if !metrics.contains(bm) {
                return Err(ConfigurationError::BaselineMetricNotSelected(bm.name.clone()));
            }
        }
        if let Some(pd) = &primary_dimension {
            if !dimensions.contains(pd) {
                return Err(ConfigurationError::PrimaryDimensionNotSelected(pd.name.clone()));
            }
        }

        Ok(ColumnConfiguration {
            metrics,
            dimensions,
            primary_metric,
            baseline_metric,
            primary_dimension,
            date_aggregation,
        })
    }

    pub fn metrics(&self) -> &[Column] {
        &self.metrics
    }

    pub fn dimensions(&self) -> &[Column] {
        &self.dimensions
    }

    pub fn primary_metric(&self) -> Option<&Column> {
        self.primary_metric.as_ref()
    }

    pub fn baseline_metric(&self) -> Option<&Column> {
        self.baseline_metric.as_ref()
    }

    pub fn primary_dimension(&self) -> Option<&Column> {
        self.primary_dimension.as_ref()
    }

    pub fn date_aggregation(&self) -> Option<DateAggregation> {
        self.date_aggregation
    }
}

impl Default for ColumnConfiguration {
    fn default() -> Self {
        ColumnConfiguration {
            metrics: Vec::new(),
            dimensions: Vec::new(),
            primary_metric: None,
            baseline_metric: None,
            primary_dimension: None,
            date_aggregation: None,
        }
    }
}
