//! FILENAME: core/baseline-engine/src/definition.rs
//! Baseline Definition - The resolved comparison target.
//!
//! A `BaselineDefinition` is derived from an applied `ColumnConfiguration`
//! once all three required designations are present. It carries only column
//! names, which is all the calculation and the search query need.

use crate::error::{BaselineError, SelectionField};
use engine::ColumnConfiguration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineDefinition {
    /// Column whose values define the groups.
    pub primary_dimension: String,

    /// Column summed as the current value.
    pub primary_metric: String,

    /// Column summed as the reference value.
    pub baseline_metric: String,
}

impl BaselineDefinition {
    pub fn new(
        primary_dimension: impl Into<String>,
        primary_metric: impl Into<String>,
        baseline_metric: impl Into<String>,
    ) -> Self {
        BaselineDefinition {
            primary_dimension: primary_dimension.into(),
            primary_metric: primary_metric.into(),
            baseline_metric: baseline_metric.into(),
        }
    }

    /// Resolves the three required designations, checked in the order
    /// dimension, primary metric, baseline metric.
    pub fn from_configuration(config: &ColumnConfiguration) -> Result<Self, BaselineError> {
        let dimension = config
            .primary_dimension()
            .ok_or(BaselineError::MissingSelection(SelectionField::PrimaryDimension))?;
        let primary = config
            .primary_metric()
            .ok_or(BaselineError::MissingSelection(SelectionField::PrimaryMetric))?;
        let baseline = config
            .baseline_metric()
            .ok_or(BaselineError::MissingSelection(SelectionField::BaselineMetric))?;

        Ok(BaselineDefinition::new(
            dimension.name.clone(),
            primary.name.clone(),
            baseline.name.clone(),
        ))
    }

    /// Search string for the worksheet service: `[dim] [primary] [baseline]`.
    pub fn query_string(&self) -> String {
        format!(
            "[{}] [{}] [{}]",
            self.primary_dimension, self.primary_metric, self.baseline_metric
        )
    }

    /// Distinct column names the query returns, in query order.
    /// Primary and baseline may name the same metric.
    pub fn query_columns(&self) -> Vec<String> {
        let mut columns = vec![self.primary_dimension.clone(), self.primary_metric.clone()];
        if !columns.contains(&self.baseline_metric) {
            columns.push(self.baseline_metric.clone());
        }
        columns
    }
}
