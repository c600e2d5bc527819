// src/ingest/header.rs

use std::collections::HashMap;
use tracing::trace;

use super::types::Cell;

/// Lower-cased, trimmed form used for every header comparison.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Index of the first row holding a cell equal to `marker` (case and
/// surrounding whitespace ignored).
pub fn find_header_row(rows: &[Vec<Cell>], marker: &str) -> Option<usize> {
    let marker = normalize_label(marker);
    rows.iter().position(|row| {
        row.iter()
            .filter_map(Cell::as_text)
            .any(|text| normalize_label(&text) == marker)
    })
}

/// Normalized header label → zero-based column index.
///
/// Blank header cells are left out. When a label repeats, the leftmost column wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    index: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn from_row(row: &[Cell]) -> Self {
        let mut index = HashMap::with_capacity(row.len());
        for (i, cell) in row.iter().enumerate() {
            let Some(text) = cell.as_text() else { continue };
            let label = normalize_label(&text);
            if label.is_empty() {
                continue;
            }
            trace!(column = i, label = %label, "header");
            index.entry(label).or_insert(i);
        }
        Self { index }
    }

    /// Column of the first candidate present in the header row. Candidate order
    /// decides priority, not column order.
    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|c| self.index.get(&normalize_label(c.as_ref())).copied())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    #[test]
    fn matching_ignores_case_and_padding() {
        let headers = HeaderMap::from_row(&row(&["Team", "  Agent Name ", "QA SCORE"]));
        assert_eq!(headers.resolve(&["Agent Name"]), Some(1));
        assert_eq!(headers.resolve(&["qa score"]), Some(2));
    }

    #[test]
    fn candidate_order_beats_column_order() {
        let headers = HeaderMap::from_row(&row(&["Total", "Total Calls"]));
        assert_eq!(headers.resolve(&["Total Calls", "Total"]), Some(1));
        assert_eq!(headers.resolve(&["Total", "Total Calls"]), Some(0));
    }

    #[test]
    fn missing_candidates_resolve_to_none() {
        let headers = HeaderMap::from_row(&row(&["", "Audits", ""]));
        assert_eq!(headers.resolve(&["DSAT"]), None);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn duplicate_labels_keep_leftmost() {
        let headers = HeaderMap::from_row(&row(&["Chats", "Inbound", "chats"]));
        assert_eq!(headers.resolve(&["Chats"]), Some(0));
    }

    #[test]
    fn numeric_header_cells_are_labels_too() {
        let headers = HeaderMap::from_row(&[Cell::Number(2024.0), Cell::from("Month")]);
        assert_eq!(headers.resolve(&["2024"]), Some(0));
    }

    #[test]
    fn header_row_is_located_by_marker() {
        let rows = vec![
            row(&["Team Performance", "", ""]),
            row(&["Lead", " AGENT NAME", "Audits"]),
            row(&["Social", "john", "3"]),
        ];
        assert_eq!(find_header_row(&rows, "Agent Name"), Some(1));
        assert_eq!(find_header_row(&rows, "Agent Email"), None);
        assert_eq!(find_header_row(&[], "Agent Name"), None);
    }
}
