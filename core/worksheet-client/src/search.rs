//! FILENAME: core/worksheet-client/src/search.rs
//! Search-data decoding: compact result pages -> rows keyed by column name.

use crate::error::ClientError;
use engine::{CellValue, Row};
use serde::{Deserialize, Serialize};

pub const SEARCH_DATA_PATH: &str = "/api/rest/2.0/searchdata";

/// Request body for one search-data page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchDataRequest<'a> {
    pub query_string: &'a str,
    pub logical_table_identifier: &'a str,
    pub data_format: &'static str,
    pub record_offset: usize,
    pub record_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchDataResponse {
    #[serde(default)]
    pub contents: Vec<SearchContent>,
}

/// One block of compact results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchContent {
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub data_rows: Vec<Vec<serde_json::Value>>,
    /// Total rows the query produced, when the service reports it.
    #[serde(default)]
    pub available_data_row_count: Option<usize>,
}

impl SearchDataResponse {
    /// The first content block, which holds the result of a single query.
    pub fn into_content(self) -> Result<SearchContent, ClientError> {
        self.contents
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("search data returned no contents".to_string()))
    }
}

impl SearchContent {
    /// Converts compact rows into keyed rows.
    ///
    /// Each response column is keyed by the requested name it matches, so a
    /// reordered response still lands under the right names. The service may
    /// rename aggregated columns (e.g. "Total Revenue" for "Revenue"), which
    /// also counts as a match. A column matching no requested name takes the
    /// requested name at its position if that name is otherwise unclaimed,
    /// and keeps its response name otherwise.
    pub fn into_rows(self, requested: &[String]) -> Result<Vec<Row>, ClientError> {
        let names = resolve_keys(&self.column_names, requested);

        self.data_rows
            .into_iter()
            .enumerate()
            .map(|(idx, values)| {
                if values.len() != names.len() {
                    return Err(ClientError::InvalidResponse(format!(
                        "row {} has {} values for {} columns",
                        idx,
                        values.len(),
                        names.len()
                    )));
                }
                let row: Row = names
                    .iter()
                    .cloned()
                    .zip(values.iter().map(cell_from_json))
                    .collect();
                Ok(row)
            })
            .collect()
    }
}

fn resolve_keys(response: &[String], requested: &[String]) -> Vec<String> {
    let matched: Vec<Option<&str>> = response
        .iter()
        .map(|name| match_requested(name, requested))
        .collect();

    response
        .iter()
        .zip(&matched)
        .enumerate()
        .map(|(idx, (name, found))| match found {
            Some(key) => key.to_string(),
            None => match requested.get(idx) {
                Some(candidate) if !matched.contains(&Some(candidate.as_str())) => candidate.clone(),
                _ => name.clone(),
            },
        })
        .collect()
}

/// Requested name a response column stands for: an exact match, then a
/// case-insensitive one, then the longest name the response column ends
/// with as a separate word ("Total Revenue" -> "Revenue").
fn match_requested<'r>(name: &str, requested: &'r [String]) -> Option<&'r str> {
    if let Some(exact) = requested.iter().find(|r| r.as_str() == name) {
        return Some(exact.as_str());
    }
    let lower = name.to_lowercase();
    requested
        .iter()
        .filter(|r| {
            let r = r.to_lowercase();
            lower == r || lower.ends_with(&format!(" {}", r))
        })
        .max_by_key(|r| r.len())
        .map(String::as_str)
}

/// Maps a JSON scalar to a cell value. Nested values are kept as their JSON text.
pub fn cell_from_json(value: &serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Empty,
        serde_json::Value::Bool(b) => CellValue::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        serde_json::Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
