// src/ingest/pipeline.rs

use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    aliases::AliasTables,
    header::{find_header_row, HeaderMap},
    row::{ColumnPlan, RowProjector},
    types::{Cell, PerformanceRecord},
};
use crate::config::CredentialConfig;
use crate::error::IngestError;
use crate::fetch::{A1Range, SheetSource, SheetsClient};

/// Full English name of the current local month, e.g. `"March"`.
pub fn current_month_name() -> String {
    Local::now().format("%B").to_string()
}

/// Turn a fetched grid into validated records.
///
/// Fewer than two rows is an empty result, not an error. `range` is only used
/// to point spreadsheet maintainers at the right place when the header row is missing.
pub fn normalize_grid(
    rows: &[Vec<Cell>],
    tables: &AliasTables,
    default_month: &str,
    range: &A1Range,
) -> Result<Vec<PerformanceRecord>, IngestError> {
    if rows.len() < 2 {
        warn!(rows = rows.len(), "no data or only headers found in the sheet");
        return Ok(Vec::new());
    }

    let schema_error = || IngestError::SchemaDiscovery {
        marker: tables.marker.clone(),
        location: range.describe_row(0),
    };

    let header_idx = find_header_row(rows, &tables.marker).ok_or_else(schema_error)?;
    let headers = HeaderMap::from_row(&rows[header_idx]);
    let plan = ColumnPlan::resolve(&headers, tables).ok_or_else(schema_error)?;
    debug!(
        header_row = header_idx,
        columns = headers.len(),
        missing = ?plan.missing_fields().map(|f| f.as_str()).collect::<Vec<_>>(),
        "resolved header row"
    );

    let projector = RowProjector::new(&plan, tables, default_month);
    let data_rows = &rows[header_idx + 1..];
    let records: Vec<PerformanceRecord> = data_rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| projector.project(i, row))
        .collect();

    for record in &records {
        record.validate()?;
    }

    info!(
        data_rows = data_rows.len(),
        records = records.len(),
        skipped = data_rows.len() - records.len(),
        "normalized sheet"
    );
    Ok(records)
}

/// Fetch-and-normalize over any [`SheetSource`].
///
/// Holds no mutable state: concurrent calls on one `Ingestor` are independent
/// and each call re-reads the source.
#[derive(Clone)]
pub struct Ingestor<S> {
    source: S,
    tables: Arc<AliasTables>,
}

impl<S: SheetSource + Sync> Ingestor<S> {
    pub fn new(source: S, tables: Arc<AliasTables>) -> Self {
        Self { source, tables }
    }

    pub fn tables(&self) -> &AliasTables {
        &self.tables
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[instrument(level = "info", skip(self))]
    pub async fn fetch_and_normalize(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<PerformanceRecord>, IngestError> {
        let selector = A1Range::parse(range)?;
        let rows = self.source.read_range(sheet_id, range).await?;
        debug!(rows = rows.len(), "fetched grid");
        normalize_grid(&rows, &self.tables, &current_month_name(), &selector)
    }
}

/// The one-shot entry point: resolve credentials, read `range` of `sheet_id` from
/// Google Sheets and normalize it.
pub async fn fetch_and_normalize(
    credentials: &CredentialConfig,
    tables: Arc<AliasTables>,
    sheet_id: &str,
    range: &str,
) -> Result<Vec<PerformanceRecord>, IngestError> {
    let client = SheetsClient::connect(credentials).await?;
    Ingestor::new(client, tables)
        .fetch_and_normalize(sheet_id, range)
        .await
}
