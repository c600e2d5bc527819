// src/fetch/mod.rs

use std::future::Future;

use crate::error::IngestError;
use crate::ingest::types::RawSheet;

pub mod auth;
pub mod range;
pub mod sheets;

pub use range::A1Range;
pub use sheets::{SheetsClient, ValueRender};

/// A read-only tabular source addressed by sheet id and A1 range.
pub trait SheetSource {
    /// Fetch the cells of `range` row by row. Failures map to
    /// [`IngestError::Transport`].
    fn read_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<RawSheet, IngestError>> + Send;
}
