//! Spreadsheet → [`PerformanceRecord`] normalization: header resolution, cell
//! normalizers, name canonicalization and row projection, driven by the
//! fetch orchestrator in [`pipeline`].

pub mod aliases;
pub mod cell;
pub mod fields;
pub mod header;
pub mod names;
pub mod pipeline;
pub mod row;
pub mod types;

pub use aliases::AliasTables;
pub use cell::{to_number, to_score, to_text};
pub use fields::{Field, Group, ParseRule};
pub use header::{find_header_row, HeaderMap};
pub use names::canonical_name;
pub use pipeline::{current_month_name, fetch_and_normalize, normalize_grid, Ingestor};
pub use row::{ColumnPlan, RowProjector};
pub use types::{Cell, Csat, Frt, PerformanceRecord, Productivity, Quality, RawSheet};
