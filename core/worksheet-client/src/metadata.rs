//! FILENAME: core/worksheet-client/src/metadata.rs
//! Metadata export decoding: TML export documents -> worksheet columns.

use crate::error::ClientError;
use engine::{Column, ColumnType};
use serde::{Deserialize, Serialize};

pub const EXPORT_PATH: &str = "/api/rest/2.0/metadata/tml/export";

/// Properties that only date columns carry in an exported worksheet.
const DATE_MARKERS: [&str; 2] = ["default_date_bucket", "calendar"];

/// Request body for the metadata export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest<'a> {
    pub metadata: Vec<MetadataIdentifier<'a>>,
    pub edoc_format: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataIdentifier<'a> {
    pub identifier: &'a str,
    #[serde(rename = "type")]
    pub metadata_type: &'static str,
}

impl<'a> ExportRequest<'a> {
    pub fn logical_table(worksheet_id: &'a str) -> Self {
        ExportRequest {
            metadata: vec![MetadataIdentifier {
                identifier: worksheet_id,
                metadata_type: "LOGICAL_TABLE",
            }],
            edoc_format: "JSON",
        }
    }
}

/// One exported document. `edoc` is itself a JSON document serialized as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportDocument {
    pub edoc: String,
}

#[derive(Debug, Deserialize)]
struct Edoc {
    worksheet: Option<EdocWorksheet>,
}

#[derive(Debug, Deserialize)]
struct EdocWorksheet {
    #[serde(default)]
    worksheet_columns: Option<Vec<WorksheetColumn>>,
}

#[derive(Debug, Deserialize)]
struct WorksheetColumn {
    name: String,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

impl WorksheetColumn {
    fn column_type(&self) -> ColumnType {
        let declared = self.properties.get("column_type").and_then(|v| v.as_str());
        match declared {
            Some("ATTRIBUTE") => {
                if DATE_MARKERS.iter().any(|m| self.properties.contains_key(*m)) {
                    ColumnType::Date
                } else {
                    ColumnType::Attribute
                }
            }
            _ => ColumnType::Measure,
        }
    }
}

/// Maps the first export document to worksheet columns.
pub fn columns_from_export(documents: &[ExportDocument]) -> Result<Vec<Column>, ClientError> {
    let document = documents
        .first()
        .ok_or_else(|| ClientError::InvalidResponse("metadata export returned no documents".to_string()))?;

    let edoc: Edoc = serde_json::from_str(&document.edoc)?;
    let columns = edoc
        .worksheet
        .and_then(|ws| ws.worksheet_columns)
        .ok_or_else(|| ClientError::InvalidResponse("export has no worksheet columns".to_string()))?;

    Ok(columns
        .into_iter()
        .map(|col| {
            let column_type = col.column_type();
            Column::new(col.name, column_type)
        })
        .collect())
}
