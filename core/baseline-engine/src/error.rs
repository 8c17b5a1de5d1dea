//! FILENAME: core/baseline-engine/src/error.rs

use std::fmt;
use thiserror::Error;

/// Which required designation is missing from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    PrimaryDimension,
    PrimaryMetric,
    BaselineMetric,
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionField::PrimaryDimension => "primary dimension",
            SelectionField::PrimaryMetric => "primary metric",
            SelectionField::BaselineMetric => "baseline metric",
        };
        f.write_str(name)
    }
}

/// Why a row could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    MissingColumn,
    NotNumeric { found: &'static str },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingColumn => f.write_str("column is missing"),
            MalformedReason::NotNumeric { found } => write!(f, "expected a number, found {}", found),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaselineError {
    #[error("Missing selection: no {0} chosen")]
    MissingSelection(SelectionField),

    #[error("Division by zero: baseline for '{group}' sums to zero")]
    DivisionByZero { group: String },

    #[error("Malformed row {row}: '{column}' {reason}")]
    MalformedRow {
        row: usize,
        column: String,
        reason: MalformedReason,
    },
}
