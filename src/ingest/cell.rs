// src/ingest/cell.rs
//
// Cell normalizers. All of them are total: anything unparseable becomes `None`.

use super::types::{Cell, PLACEHOLDER};

fn meaningful(raw: &str) -> Option<&str> {
    let t = raw.trim();
    if t.is_empty() || t == PLACEHOLDER {
        None
    } else {
        Some(t)
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Values above 1 in magnitude are taken to be whole percentages.
fn ratio_from(n: f64) -> f64 {
    if n.abs() > 1.0 {
        n / 100.0
    } else {
        n
    }
}

/// Plain numeric cell. Thousands separators (`,`) are ignored.
pub fn to_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Some(*n).filter(|n| n.is_finite()),
        Cell::Text(raw) => parse_finite(&meaningful(raw)?.replace(',', "")),
    }
}

/// Percentage-aware ratio.
///
/// `"95%"` → 0.95, `97` → 0.97, `0.8` → 0.8. A bare `1` (or `"1"`) stays 1.0:
/// it cannot be told apart from 100% and is treated as already a ratio.
pub fn to_score(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Some(*n).filter(|n| n.is_finite()).map(ratio_from),
        Cell::Text(raw) => {
            let text = meaningful(raw)?;
            if text.contains('%') {
                let digits: String = text
                    .chars()
                    .filter(|c| !matches!(c, '%' | ',') && !c.is_whitespace())
                    .collect();
                parse_finite(&digits).map(|n| n / 100.0)
            } else {
                parse_finite(&text.replace(',', "")).map(ratio_from)
            }
        }
    }
}

/// Trimmed text, `None` when the cell is empty.
pub fn to_text(cell: &Cell) -> Option<String> {
    let text = cell.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
