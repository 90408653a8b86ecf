//! HTTP transport for the tracking spreadsheet.
//!
//! This module provides a reqwest-based implementation of the
//! [`SheetClient`](crate::SheetClient) trait. Two read paths exist: the public
//! gviz CSV export (no credentials) and the v4 values API (API key).

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::Config;
use crate::{RawRecord, SheetClient, SheetError, ingest};

/// Client for a Google Sheets tracking sheet using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestSheetClient {
    config: Config,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

impl ReqwestSheetClient {
    /// Create a new client instance. Trailing slashes on the configured hosts
    /// are dropped.
    pub fn new(config: Config) -> Self {
        let mut config = config;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// URL of the CSV export (without query string).
    pub fn csv_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.config.base_url, self.config.sheet_id
        )
    }

    /// URL of the values API endpoint for an A1 `range`.
    pub fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.api_url, self.config.sheet_id, range
        )
    }

    /// Download one tab of the sheet as CSV text.
    pub async fn fetch_csv(&self, sheet: &str) -> Result<String, SheetError> {
        let request = self
            .client
            .get(self.csv_url())
            .query(&[("tqx", "out:csv"), ("sheet", sheet)]);
        self.execute_text(request).await
    }

    /// Read an A1 `range` through the values API as a header-first cell
    /// matrix. Non-string cells are rendered with their JSON text.
    pub async fn fetch_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| SheetError::Config("values API requires an API key".into()))?;
        let request = self
            .client
            .get(self.values_url(range))
            .query(&[("key", key.expose_secret())]);
        let text = self.execute_text(request).await?;
        let value_range: ValueRange = serde_json::from_str(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            SheetError::DataLoad(format!("decoding value range: {e} - body: {body_snippet}"))
        })?;
        let values = value_range.values.unwrap_or_default();
        Ok(values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Read one tab through whichever path the config selects. `tab` only
    /// labels metrics and logs.
    async fn fetch_tab(
        &self,
        tab: &'static str,
        sheet: &str,
        range: &str,
    ) -> Result<Vec<RawRecord>, SheetError> {
        let source = if self.config.uses_values_api() {
            "values_api"
        } else {
            "csv"
        };
        metrics::counter!("sheet_fetch_total", "source" => source, "tab" => tab).increment(1);

        let result = if self.config.uses_values_api() {
            self.fetch_values(range)
                .await
                .and_then(ingest::records_from_rows)
        } else {
            self.fetch_csv(sheet)
                .await
                .and_then(|text| ingest::parse_csv(&text))
        };

        if let Err(e) = &result {
            metrics::counter!("sheet_fetch_errors_total", "kind" => e.kind(), "tab" => tab)
                .increment(1);
            tracing::warn!(error = %e, source, tab, "sheet fetch failed");
        }
        result
    }

    /// Execute a request and expect a text response.
    async fn execute_text(&self, request: reqwest::RequestBuilder) -> Result<String, SheetError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.text().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> SheetError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        SheetError::Status {
            status,
            body: body_snippet,
        }
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetClient for ReqwestSheetClient {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, SheetError> {
        self.fetch_tab("responses", &self.config.sheet_name, &self.config.range)
            .await
    }

    async fn fetch_measurements(&self) -> Result<Vec<RawRecord>, SheetError> {
        self.fetch_tab(
            "measurements",
            &self.config.measurements_sheet,
            &self.config.measurements_range,
        )
        .await
    }
}
