//! FILENAME: app/src/column_selection.rs
//! PURPOSE: Form state for choosing metrics, dimensions and their designations.
//! CONTEXT: Holds the working selection between user events. The only output
//! is `snapshot()`, which produces a full `ColumnConfiguration`.
//!
//! Invariants maintained after every operation:
//! - a column is in at most one of metrics/dimensions
//! - primary/baseline metric are always members of metrics
//! - primary dimension is always a member of dimensions

use engine::{Column, ColumnConfiguration, ConfigurationError, DateAggregation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{0}' is not a selected metric")]
    NotAMetric(String),

    #[error("Column '{0}' is not a selected dimension")]
    NotADimension(String),
}

#[derive(Debug, Clone, Default)]
pub struct ColumnSelection {
    columns: Vec<Column>,
    metrics: Vec<Column>,
    dimensions: Vec<Column>,
    primary_metric: Option<Column>,
    baseline_metric: Option<Column>,
    primary_dimension: Option<Column>,
    date_aggregation: Option<DateAggregation>,
}

impl ColumnSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: Vec<Column>) -> Self {
        let mut selection = Self::new();
        selection.set_columns(columns);
        selection
    }

    /// Replaces the source column list. Selections whose column disappeared
    /// (or changed type) are dropped.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        let columns = &self.columns;
        self.metrics.retain(|c| columns.contains(c));
        self.dimensions.retain(|c| columns.contains(c));
        self.clear_stale_designations();
    }

    // ========================================================================
    // TOGGLES
    // ========================================================================

    /// Adds the column to metrics, or removes it if already there.
    /// Returns whether the column is a metric afterwards.
    pub fn toggle_metric(&mut self, name: &str) -> Result<bool, SelectionError> {
        let column = self.find(name)?;
        let now_selected = if self.metrics.contains(&column) {
            self.metrics.retain(|c| c != &column);
            false
        } else {
            self.dimensions.retain(|c| c != &column);
            self.metrics.push(column);
            true
        };
        self.clear_stale_designations();
        Ok(now_selected)
    }

    /// Adds the column to dimensions, or removes it if already there.
    /// Returns whether the column is a dimension afterwards.
    pub fn toggle_dimension(&mut self, name: &str) -> Result<bool, SelectionError> {
        let column = self.find(name)?;
        let now_selected = if self.dimensions.contains(&column) {
            self.dimensions.retain(|c| c != &column);
            false
        } else {
            self.metrics.retain(|c| c != &column);
            self.dimensions.push(column);
            true
        };
        self.clear_stale_designations();
        Ok(now_selected)
    }

    // ========================================================================
    // DESIGNATIONS
    // ========================================================================

    pub fn set_primary_metric(&mut self, name: &str) -> Result<(), SelectionError> {
        let column = self.selected_metric(name)?;
        self.primary_metric = Some(column);
        Ok(())
    }

    pub fn set_baseline_metric(&mut self, name: &str) -> Result<(), SelectionError> {
        let column = self.selected_metric(name)?;
        self.baseline_metric = Some(column);
        Ok(())
    }

    pub fn set_primary_dimension(&mut self, name: &str) -> Result<(), SelectionError> {
        self.find(name)?;
        let column = self
            .dimensions
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| SelectionError::NotADimension(name.to_string()))?;
        self.primary_dimension = Some(column);
        Ok(())
    }

    pub fn set_date_aggregation(&mut self, aggregation: Option<DateAggregation>) {
        self.date_aggregation = aggregation;
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
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

    /// Columns not yet placed in any role, in source order.
    pub fn available_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !self.holds_role(c))
            .collect()
    }

    /// Metrics followed by dimensions.
    pub fn selected_columns(&self) -> Vec<&Column> {
        self.metrics.iter().chain(self.dimensions.iter()).collect()
    }

    /// Available columns whose type suggests a metric.
    pub fn metric_candidates(&self) -> Vec<&Column> {
        self.available_columns()
            .into_iter()
            .filter(|c| c.column_type.suggests_metric())
            .collect()
    }

    /// Available columns whose type suggests a dimension.
    pub fn dimension_candidates(&self) -> Vec<&Column> {
        self.available_columns()
            .into_iter()
            .filter(|c| c.column_type.suggests_dimension())
            .collect()
    }

    /// Full snapshot of the current selection.
    pub fn snapshot(&self) -> Result<ColumnConfiguration, ConfigurationError> {
        ColumnConfiguration::new(
            self.metrics.clone(),
            self.dimensions.clone(),
            self.primary_metric.clone(),
            self.baseline_metric.clone(),
            self.primary_dimension.clone(),
            self.date_aggregation,
        )
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn find(&self, name: &str) -> Result<Column, SelectionError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownColumn(name.to_string()))
    }

    fn selected_metric(&self, name: &str) -> Result<Column, SelectionError> {
        self.find(name)?;
        self.metrics
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| SelectionError::NotAMetric(name.to_string()))
    }

    fn holds_role(&self, column: &Column) -> bool {
        self.metrics.contains(column)
            || self.dimensions.contains(column)
            || self.primary_metric.as_ref() == Some(column)
            || self.baseline_metric.as_ref() == Some(column)
            || self.primary_dimension.as_ref() == Some(column)
    }

    /// Drops designations whose column is no longer in its list.
    fn clear_stale_designations(&mut self) {
        if let Some(pm) = &self.primary_metric {
            if !self.metrics.contains(pm) {
                self.primary_metric = None;
            }
        }
        if let Some(bm) = &self.baseline_metric {
            if !self.metrics.contains(bm) {
                self.baseline_metric = None;
            }
        }
        if let Some(pd) = &self.primary_dimension {
            if !self.dimensions.contains(pd) {
                self.primary_dimension = None;
            }
        }
    }
}
