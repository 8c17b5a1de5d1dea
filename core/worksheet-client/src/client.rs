//! FILENAME: core/worksheet-client/src/client.rs
//! HTTP client for the analytics service.

use crate::config::ServiceConfig;
use crate::error::ClientError;
use crate::metadata::{columns_from_export, ExportDocument, ExportRequest, EXPORT_PATH};
use crate::search::{SearchDataRequest, SearchDataResponse, SEARCH_DATA_PATH};
use engine::{Column, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Async client bound to one service and worksheet.
///
/// No retries are attempted; callers decide whether a failure is retried.
#[derive(Debug, Clone)]
pub struct WorksheetClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl WorksheetClient {
    /// Builds a pooled HTTP client with the configured timeout.
    pub fn new(config: ServiceConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(WorksheetClient { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Exports the worksheet's metadata and classifies its columns.
    pub async fn export_columns(&self) -> Result<Vec<Column>, ClientError> {
        log::info!(
            target: "CLIENT",
            "export_columns worksheet={}",
            self.config.worksheet_id
        );
        let body = ExportRequest::logical_table(&self.config.worksheet_id);
        let documents: Vec<ExportDocument> = self.post_json(EXPORT_PATH, &body).await?;
        let columns = columns_from_export(&documents)?;
        log::info!(target: "CLIENT", "export_columns returned {} columns", columns.len());
        Ok(columns)
    }

    /// Runs a search query, following pages until the result is exhausted.
    /// `columns` are the names requested by the query, in query order.
    ///
    /// Paging stops on an empty or short page, or once the service's reported
    /// row count has been read. A query still returning full pages after
    /// `max_pages` requests is an `InvalidResponse`.
    pub async fn search_rows(&self, query: &str, columns: &[String]) -> Result<Vec<Row>, ClientError> {
        log::info!(target: "CLIENT", "search_rows query={}", query);
        let record_size = self.config.record_size;
        let mut rows = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            if pages == self.config.max_pages {
                log::warn!(
                    target: "CLIENT",
                    "search_rows stopped after {} pages ({} rows)",
                    pages,
                    rows.len()
                );
                return Err(ClientError::InvalidResponse(format!(
                    "search data still paging after {} pages",
                    pages
                )));
            }

            let body = SearchDataRequest {
                query_string: query,
                logical_table_identifier: &self.config.worksheet_id,
                data_format: "COMPACT",
                record_offset: offset,
                record_size,
            };
            let response: SearchDataResponse = self.post_json(SEARCH_DATA_PATH, &body).await?;
            let content = response.into_content()?;
            let page_len = content.data_rows.len();
            let available = content.available_data_row_count;
            rows.extend(content.into_rows(columns)?);
            pages += 1;

            log::debug!(target: "CLIENT", "search_rows page offset={} rows={}", offset, page_len);
            if page_len < record_size {
                break;
            }
            if available.is_some_and(|total| rows.len() >= total) {
                break;
            }
            offset += page_len;
        }

        log::info!(target: "CLIENT", "search_rows returned {} rows", rows.len());
        Ok(rows)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            log::warn!(target: "CLIENT", "{} failed with HTTP {}", path, status.as_u16());
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
