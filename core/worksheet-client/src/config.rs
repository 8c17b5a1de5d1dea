//! FILENAME: core/worksheet-client/src/config.rs
//! Service configuration passed to the client at construction time.

use crate::error::ClientError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RECORD_SIZE: usize = 1000;
const DEFAULT_MAX_PAGES: usize = 1000;

/// Where the analytics service lives and which worksheet to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the analytics service: scheme, host and optional port.
    /// API paths are absolute, so a path prefix here is rejected.
    pub base_url: String,

    /// Identifier of the worksheet (logical table) to read.
    pub worksheet_id: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rows requested per search-data page.
    #[serde(default = "default_record_size")]
    pub record_size: usize,

    /// Upper bound on search-data pages fetched for one query.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_record_size() -> usize {
    DEFAULT_RECORD_SIZE
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, worksheet_id: impl Into<String>) -> Self {
        ServiceConfig {
            base_url: base_url.into(),
            worksheet_id: worksheet_id.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            record_size: DEFAULT_RECORD_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Parses a JSON configuration document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base()?;
        if base.path() != "/" {
            return Err(ClientError::Config(format!(
                "base_url '{}' must not contain a path",
                self.base_url
            )));
        }
        if self.worksheet_id.trim().is_empty() {
            return Err(ClientError::Config("worksheet_id is empty".to_string()));
        }
        if self.record_size == 0 {
            return Err(ClientError::Config("record_size must be positive".to_string()));
        }
        if self.max_pages == 0 {
            return Err(ClientError::Config("max_pages must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL.
    pub fn base(&self) -> Result<Url, ClientError> {
        Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url '{}': {}", self.base_url, e)))
    }

    /// Joins an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let base = self.base()?;
        base.join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }
}
