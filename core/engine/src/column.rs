//! FILENAME: core/engine/src/column.rs
//! PURPOSE: Worksheet column descriptors and the date aggregation granularity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// COLUMN TYPE
// ============================================================================

/// Classification of a worksheet column as reported by the metadata export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Measure,
    Attribute,
    Date,
}

impl ColumnType {
    /// Whether the column is naturally offered as a metric.
    pub fn suggests_metric(self) -> bool {
        matches!(self, ColumnType::Measure)
    }

    /// Whether the column is naturally offered as a dimension.
    pub fn suggests_dimension(self) -> bool {
        matches!(self, ColumnType::Attribute | ColumnType::Date)
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// A single worksheet column. Identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
        }
    }

    pub fn measure(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Measure)
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Attribute)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Date)
    }
}

// ============================================================================
// DATE AGGREGATION
// ============================================================================

/// Granularity at which date columns are bucketed.
/// Descriptive only: the baseline calculation does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateAggregation {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl DateAggregation {
    /// All granularities in the order they are offered to the user.
    pub const ALL: [DateAggregation; 5] = [
        DateAggregation::Daily,
        DateAggregation::Weekly,
        DateAggregation::Monthly,
        DateAggregation::Quarterly,
        DateAggregation::Yearly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateAggregation::Daily => "DAILY",
            DateAggregation::Weekly => "WEEKLY",
            DateAggregation::Monthly => "MONTHLY",
            DateAggregation::Quarterly => "QUARTERLY",
            DateAggregation::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for DateAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a date aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date aggregation: {0}")]
pub struct UnknownDateAggregation(pub String);

impl FromStr for DateAggregation {
    type Err = UnknownDateAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DateAggregation::ALL
            .iter()
            .copied()
            .find(|agg| agg.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDateAggregation(s.to_string()))
    }
}
