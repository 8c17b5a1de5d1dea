//! FILENAME: core/baseline-engine/src/view.rs
//! Baseline View - The output records returned to the caller.

use crate::error::BaselineError;
use serde::{Deserialize, Serialize};

/// One comparison row per distinct primary-dimension value.
///
/// `None` in `pct_change`, `pct_of_total` or `weighted_change` means the
/// denominator was zero. It serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineResult {
    pub primary_dimension: String,
    pub primary_metric: f64,
    pub baseline_metric: f64,
    pub pct_of_total: Option<f64>,
    pub pct_change: Option<f64>,
    pub raw_change: f64,
    pub weighted_change: Option<f64>,
}

impl BaselineResult {
    /// Percent change, or `DivisionByZero` when the baseline summed to zero.
    pub fn checked_pct_change(&self) -> Result<f64, BaselineError> {
        self.pct_change.ok_or_else(|| BaselineError::DivisionByZero {
            group: self.primary_dimension.clone(),
        })
    }
}

/// Sums across every group of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotals {
    pub primary_metric: f64,
    pub baseline_metric: f64,
    pub raw_change: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_serializes_as_null() {
        let result = BaselineResult {
            primary_dimension: "Launch".to_string(),
            primary_metric: 40.0,
            baseline_metric: 0.0,
            pct_of_total: Some(1.0),
            pct_change: None,
            raw_change: 40.0,
            weighted_change: Some(40.0),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["pctChange"].is_null());
        assert_eq!(json["primaryDimension"], "Launch");
        assert_eq!(json["weightedChange"], 40.0);
    }

    #[test]
    fn test_checked_pct_change() {
        let mut result = BaselineResult {
            primary_dimension: "East".to_string(),
            primary_metric: 120.0,
            baseline_metric: 100.0,
            pct_of_total: None,
            pct_change: Some(0.2),
            raw_change: 20.0,
            weighted_change: None,
        };
        assert_eq!(result.checked_pct_change(), Ok(0.2));

        result.pct_change = None;
        assert_eq!(
            result.checked_pct_change(),
            Err(BaselineError::DivisionByZero { group: "East".to_string() })
        );
    }
}
