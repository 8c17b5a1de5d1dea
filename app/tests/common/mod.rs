//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for workbench integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state, AppState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use worksheet_client::{ServiceConfig, WorksheetClient};

pub const WORKSHEET_ID: &str = "782b50d1-fe89-4fee-812f-b5f9eb0a552d";
pub const EXPORT_PATH: &str = "/api/rest/2.0/metadata/tml/export";
pub const SEARCH_PATH: &str = "/api/rest/2.0/searchdata";

/// Test harness holding app state and a client pointed at a mock service.
pub struct TestHarness {
    pub state: AppState,
    pub server: MockServer,
    pub client: WorksheetClient,
}

impl TestHarness {
    /// Create a harness with empty state and no mocks mounted.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let mut config = ServiceConfig::new(server.uri(), WORKSHEET_ID);
        config.record_size = 100;
        let client = WorksheetClient::new(config).expect("client builds");
        TestHarness {
            state: create_app_state(),
            server,
            client,
        }
    }

    /// Create a harness whose service exports the sales worksheet, with
    /// columns already loaded into the selection.
    pub async fn with_sales_columns() -> Self {
        let harness = Self::new().await;
        harness.mount_export(SalesFixture::export_response()).await;
        app_lib::load_columns(&harness.state, &harness.client)
            .await
            .expect("columns load");
        harness
    }

    pub async fn mount_export(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(EXPORT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_search(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Toggle region/rev/prior into place, designate them and apply.
    pub fn apply_region_rev_prior(&self) {
        app_lib::toggle_dimension(&self.state, "region").unwrap();
        app_lib::toggle_metric(&self.state, "rev").unwrap();
        app_lib::toggle_metric(&self.state, "prior").unwrap();
        app_lib::set_primary_dimension(&self.state, "region").unwrap();
        app_lib::set_primary_metric(&self.state, "rev").unwrap();
        app_lib::set_baseline_metric(&self.state, "prior").unwrap();
        app_lib::apply_configuration(&self.state).unwrap();
    }
}

/// Sales worksheet fixture.
pub struct SalesFixture;

impl SalesFixture {
    pub fn edoc() -> serde_json::Value {
        json!({
            "guid": WORKSHEET_ID,
            "worksheet": {
                "name": "Sales",
                "worksheet_columns": [
                    {"name": "region", "column_id": "Sales::region", "properties": {"column_type": "ATTRIBUTE"}},
                    {"name": "rev", "column_id": "Sales::rev", "properties": {"column_type": "MEASURE", "aggregation": "SUM"}},
                    {"name": "prior", "column_id": "Sales::prior", "properties": {"column_type": "MEASURE", "aggregation": "SUM"}},
                    {"name": "order date", "column_id": "Sales::order_date", "properties": {"column_type": "ATTRIBUTE", "default_date_bucket": "DAILY"}}
                ]
            }
        })
    }

    pub fn export_response() -> serde_json::Value {
        json!([{
            "info": {"name": "Sales", "id": WORKSHEET_ID, "status": {"status_code": "OK"}},
            "edoc": Self::edoc().to_string()
        }])
    }

    /// Compact search result with the given rows of (region, rev, prior).
    pub fn search_response(rows: &[(&str, f64, f64)]) -> serde_json::Value {
        let data_rows: Vec<serde_json::Value> = rows
            .iter()
            .map(|(region, rev, prior)| json!([region, rev, prior]))
            .collect();
        json!({
            "contents": [{
                "available_data_row_count": rows.len(),
                "column_names": ["region", "Total rev", "Total prior"],
                "data_rows": data_rows,
                "record_offset": 0,
                "record_size": 100,
                "returned_data_row_count": rows.len(),
                "sampling_ratio": 1
            }]
        })
    }
}
