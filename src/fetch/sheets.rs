// src/fetch/sheets.rs

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{auth::ServiceAccountAuth, SheetSource};
use crate::config::CredentialConfig;
use crate::error::IngestError;
use crate::ingest::types::{Cell, RawSheet};

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

/// How the Sheets API renders cell values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueRender {
    /// Values as displayed in the sheet (`"95%"`, `"1,204"`).
    #[default]
    Formatted,
    /// Raw numbers (`0.95`, `1204`).
    Unformatted,
}

impl ValueRender {
    fn as_param(&self) -> &'static str {
        match self {
            ValueRender::Formatted => "FORMATTED_VALUE",
            ValueRender::Unformatted => "UNFORMATTED_VALUE",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Google Sheets `values.get` client authenticated as a service account.
pub struct SheetsClient {
    http: Client,
    auth: ServiceAccountAuth,
    base: Url,
    render: ValueRender,
}

impl SheetsClient {
    /// Resolve credentials and prepare a client. Fails with
    /// [`IngestError::Configuration`] when no credentials are configured.
    pub async fn connect(config: &CredentialConfig) -> Result<Self, IngestError> {
        let credentials = config.resolve()?;
        let auth = ServiceAccountAuth::from_credentials(&credentials).await?;
        let base = Url::parse(SHEETS_API)
            .map_err(|e| IngestError::Configuration(format!("bad Sheets API url: {}", e)))?;
        Ok(Self {
            http: Client::new(),
            auth,
            base,
            render: ValueRender::default(),
        })
    }

    pub fn with_value_render(mut self, render: ValueRender) -> Self {
        self.render = render;
        self
    }

    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url, IngestError> {
        values_url(&self.base, sheet_id, range)
    }
}

fn values_url(base: &Url, sheet_id: &str, range: &str) -> Result<Url, IngestError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| IngestError::Configuration(format!("{} cannot be a base url", base)))?
        .pop_if_empty()
        .extend([sheet_id, "values", range]);
    Ok(url)
}

fn into_raw_sheet(range: ValueRange) -> RawSheet {
    range
        .values
        .iter()
        .map(|row| row.iter().map(Cell::from_json).collect())
        .collect()
}

impl SheetSource for SheetsClient {
    #[instrument(level = "info", skip(self))]
    async fn read_range(&self, sheet_id: &str, range: &str) -> Result<RawSheet, IngestError> {
        let token = self.auth.bearer_token().await?;
        let url = self.values_url(sheet_id, range)?;

        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", self.render.as_param()),
            ])
            .send()
            .await
            .map_err(|e| IngestError::transport(format!("GET {}", url), &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IngestError::Transport(format!(
                "Sheets API answered {} for {}: {}",
                status,
                range,
                body.trim()
            )));
        }

        let values: ValueRange = resp
            .json()
            .await
            .map_err(|e| IngestError::transport(format!("decoding values from {}", url), &e))?;
        debug!(rows = values.values.len(), "fetched rows");
        Ok(into_raw_sheet(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_url_escapes_range() -> anyhow::Result<()> {
        let base = Url::parse(SHEETS_API)?;
        let url = values_url(&base, "abc123", "Team Performance!A2:P100")?;
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Team%20Performance!A2:P100"
        );
        Ok(())
    }

    #[test]
    fn value_range_payload_maps_to_cells() -> anyhow::Result<()> {
        let payload = r#"{
            "range": "'Team Performance'!A2:C4",
            "majorDimension": "ROWS",
            "values": [["Team", "Agent Name", "QA Score"], ["Social", "john smith", 0.95], []]
        }"#;
        let grid = into_raw_sheet(serde_json::from_str(payload)?);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][2], Cell::Number(0.95));
        assert!(grid[2].is_empty());
        Ok(())
    }

    #[test]
    fn empty_ranges_have_no_values_key() -> anyhow::Result<()> {
        let grid = into_raw_sheet(serde_json::from_str(r#"{"range": "A1:B2"}"#)?);
        assert!(grid.is_empty());
        Ok(())
    }

    #[test]
    fn render_option_params() {
        assert_eq!(ValueRender::default().as_param(), "FORMATTED_VALUE");
        assert_eq!(ValueRender::Unformatted.as_param(), "UNFORMATTED_VALUE");
    }
}
