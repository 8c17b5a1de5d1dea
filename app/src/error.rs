//! FILENAME: app/src/error.rs

use crate::column_selection::SelectionError;
use baseline_engine::BaselineError;
use engine::{ConfigurationError, UnknownDateAggregation};
use thiserror::Error;
use worksheet_client::ClientError;

/// Every failure is scoped to one command invocation; none is fatal.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    DateAggregation(#[from] UnknownDateAggregation),

    #[error(transparent)]
    Baseline(#[from] BaselineError),

    #[error("Transport failure: {0}")]
    TransportFailure(#[from] ClientError),

    #[error("No configuration has been applied")]
    NotConfigured,
}

impl AppError {
    /// Transport failures may succeed on a later attempt; everything else
    /// needs the user to change their input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::TransportFailure(_))
    }
}
