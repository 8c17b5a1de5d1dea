//! FILENAME: core/engine/src/row.rs
//! PURPOSE: A single result row keyed by column name.

use crate::cell::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of query output. Read-only input to the baseline calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            values: HashMap::new(),
        }
    }

    /// Builder-style insert, used when assembling rows from query output.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Row {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
