//! FILENAME: core/baseline-engine/src/lib.rs
//! Baseline comparison subsystem.
//!
//! This crate compares a primary metric against a baseline metric for every
//! value of a primary dimension. It depends on `engine` only for shared types
//! (ColumnConfiguration, Row, CellValue).
//!
//! Layers:
//! - `definition`: Resolved selection (WHAT is compared) and the query it needs
//! - `engine`: Calculation engine (HOW we aggregate)
//! - `view`: Output records (WHAT the caller receives)
//! - `error`: Failure taxonomy for a single calculation

pub mod definition;
pub mod engine;
pub mod error;
pub mod view;

pub use definition::BaselineDefinition;
pub use self::engine::{calculate_baseline, calculate_with_definition, grand_totals};
pub use error::{BaselineError, MalformedReason, SelectionField};
pub use view::{BaselineResult, GrandTotals};
