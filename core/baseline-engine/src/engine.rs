//! FILENAME: core/baseline-engine/src/engine.rs
//! Baseline Engine - Turns a definition and a row set into comparison rows.
//!
//! Algorithm:
//! 1. Resolve the primary dimension, primary metric and baseline metric
//! 2. Group rows by the display value of the primary dimension
//! 3. Sum primary and baseline values per group
//! 4. Derive raw change, percent change, share of total and weighted change
//!
//! Groups are emitted in the order their key is first seen in the rows.

use crate::definition::BaselineDefinition;
use crate::error::{BaselineError, MalformedReason};
use crate::view::{BaselineResult, GrandTotals};
use engine::{CellValue, ColumnConfiguration, Row};
use rustc_hash::FxHashMap;

// ============================================================================
// GROUP ACCUMULATOR
// ============================================================================

/// Running sums for one primary-dimension value.
#[derive(Debug, Clone)]
struct GroupAccumulator {
    label: String,
    primary: f64,
    baseline: f64,
}

impl GroupAccumulator {
    fn new(label: String) -> Self {
        GroupAccumulator {
            label,
            primary: 0.0,
            baseline: 0.0,
        }
    }
}

// ============================================================================
// BASELINE CALCULATOR
// ============================================================================

/// The main calculation engine for baseline comparisons.
pub struct BaselineCalculator<'a> {
    definition: &'a BaselineDefinition,

    /// Groups in first-seen order.
    groups: Vec<GroupAccumulator>,

    /// Group label -> index into `groups`.
    group_index: FxHashMap<String, usize>,
}

impl<'a> BaselineCalculator<'a> {
    pub fn new(definition: &'a BaselineDefinition) -> Self {
        BaselineCalculator {
            definition,
            groups: Vec::new(),
            group_index: FxHashMap::default(),
        }
    }

    /// Executes the full calculation over `rows`.
    pub fn calculate(mut self, rows: &[Row]) -> Result<Vec<BaselineResult>, BaselineError> {
        // Step 1-2: group and sum
        for (row_idx, row) in rows.iter().enumerate() {
            self.accumulate(row_idx, row)?;
        }

        // Step 3: grand total of the primary metric for share of total
        let total_primary: f64 = self.groups.iter().map(|g| g.primary).sum();

        log::debug!(
            target: "BASELINE",
            "calculated {} groups from {} rows (total primary {})",
            self.groups.len(),
            rows.len(),
            total_primary
        );

        // Step 4: derive comparison fields
        Ok(self
            .groups
            .into_iter()
            .map(|g| derive_result(g, total_primary))
            .collect())
    }

    fn accumulate(&mut self, row_idx: usize, row: &Row) -> Result<(), BaselineError> {
        let label = read_label(row_idx, row, &self.definition.primary_dimension)?;
        let primary = read_number(row_idx, row, &self.definition.primary_metric)?;
        let baseline = read_number(row_idx, row, &self.definition.baseline_metric)?;

        let idx = match self.group_index.get(&label) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.group_index.insert(label.clone(), idx);
                self.groups.push(GroupAccumulator::new(label));
                idx
            }
        };

        let group = &mut self.groups[idx];
        group.primary += primary;
        group.baseline += baseline;
        Ok(())
    }
}

/// Builds the output record for one group.
fn derive_result(group: GroupAccumulator, total_primary: f64) -> BaselineResult {
    let raw_change = group.primary - group.baseline;
    let pct_change = if group.baseline != 0.0 {
        Some(raw_change / group.baseline)
    } else {
        None
    };
    let pct_of_total = if total_primary != 0.0 {
        Some(group.primary / total_primary)
    } else {
        None
    };
    let weighted_change = pct_of_total.map(|share| raw_change * share);

    BaselineResult {
        primary_dimension: group.label,
        primary_metric: group.primary,
        baseline_metric: group.baseline,
        pct_of_total,
        pct_change,
        raw_change,
        weighted_change,
    }
}

fn read_cell<'r>(row_idx: usize, row: &'r Row, column: &str) -> Result<&'r CellValue, BaselineError> {
    row.get(column).ok_or_else(|| BaselineError::MalformedRow {
        row: row_idx,
        column: column.to_string(),
        reason: MalformedReason::MissingColumn,
    })
}

fn read_label(row_idx: usize, row: &Row, column: &str) -> Result<String, BaselineError> {
    read_cell(row_idx, row, column).map(CellValue::display_value)
}

fn read_number(row_idx: usize, row: &Row, column: &str) -> Result<f64, BaselineError> {
    let cell = read_cell(row_idx, row, column)?;
    cell.as_number().ok_or_else(|| BaselineError::MalformedRow {
        row: row_idx,
        column: column.to_string(),
        reason: MalformedReason::NotNumeric { found: cell.kind() },
    })
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates baseline comparison rows from an applied configuration.
/// This is the main entry point for the calculation engine.
pub fn calculate_baseline(
    config: &ColumnConfiguration,
    rows: &[Row],
) -> Result<Vec<BaselineResult>, BaselineError> {
    let definition = BaselineDefinition::from_configuration(config)?;
    calculate_with_definition(&definition, rows)
}

/// Calculates baseline comparison rows from an already resolved definition.
pub fn calculate_with_definition(
    definition: &BaselineDefinition,
    rows: &[Row],
) -> Result<Vec<BaselineResult>, BaselineError> {
    BaselineCalculator::new(definition).calculate(rows)
}

/// Sums primary and baseline values over a set of results.
pub fn grand_totals(results: &[BaselineResult]) -> GrandTotals {
    let primary_metric: f64 = results.iter().map(|r| r.primary_metric).sum();
    let baseline_metric: f64 = results.iter().map(|r| r.baseline_metric).sum();
    GrandTotals {
        primary_metric,
        baseline_metric,
        raw_change: primary_metric - baseline_metric,
    }
}
