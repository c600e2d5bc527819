// src/fetch/range.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::IngestError;

static CELLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<c1>[A-Z]{1,3})?(?P<r1>[0-9]+)?(?::(?P<c2>[A-Z]{1,3})?(?P<r2>[0-9]+)?)?$")
        .expect("A1 cell pattern should compile")
});

/// A cell-range selector in A1 notation, e.g. `Team Performance!A2:P100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: Option<String>,
    pub cells: Option<String>,
    /// Sheet row number of the first row the range returns.
    pub first_row: u32,
}

impl A1Range {
    pub fn parse(input: &str) -> Result<Self, IngestError> {
        let invalid = |reason: &str| IngestError::InvalidRange {
            range: input.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(invalid("range is empty"));
        }

        let (sheet, cells) = match text.rsplit_once('!') {
            Some((sheet, cells)) => {
                let sheet = unquote(sheet).ok_or_else(|| invalid("sheet name is malformed"))?;
                if cells.is_empty() {
                    return Err(invalid("nothing after `!`"));
                }
                (Some(sheet), Some(cells))
            }
            None if CELLS.is_match(text) => (None, Some(text)),
            None => (Some(unquote(text).ok_or_else(|| invalid("sheet name is malformed"))?), None),
        };

        let first_row = match cells {
            None => 1,
            Some(cells) => {
                let caps = CELLS
                    .captures(cells)
                    .ok_or_else(|| invalid("cells are not in A1 notation"))?;
                let has = |name: &str| caps.name(name).is_some();
                if !has("c1") && !has("r1") {
                    return Err(invalid("missing start cell"));
                }
                if cells.contains(':') && !has("c2") && !has("r2") {
                    return Err(invalid("missing end cell"));
                }
                match caps.name("r1") {
                    Some(r) => r
                        .as_str()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid("row numbers start at 1"))?,
                    None => 1,
                }
            }
        };

        Ok(Self {
            sheet,
            cells: cells.map(str::to_string),
            first_row,
        })
    }

    /// Where in the sheet the `offset`-th returned row sits, for messages.
    pub fn describe_row(&self, offset: usize) -> String {
        let row = self.first_row as usize + offset;
        match &self.sheet {
            Some(sheet) => format!("row {} of sheet '{}'", row, sheet),
            None => format!("row {}", row),
        }
    }
}

fn unquote(sheet: &str) -> Option<String> {
    let sheet = sheet.trim();
    let name = if sheet.len() >= 2 && sheet.starts_with('\'') && sheet.ends_with('\'') {
        sheet[1..sheet.len() - 1].replace("''", "'")
    } else if sheet.contains('\'') {
        return None;
    } else {
        sheet.to_string()
    };
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.sheet, &self.cells) {
            (Some(sheet), Some(cells)) => write!(f, "'{}'!{}", sheet.replace('\'', "''"), cells),
            (Some(sheet), None) => write!(f, "'{}'", sheet.replace('\'', "''")),
            (None, Some(cells)) => f.write_str(cells),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_and_cells() -> anyhow::Result<()> {
        let r = A1Range::parse("Team Performance!A2:P100")?;
        assert_eq!(r.sheet.as_deref(), Some("Team Performance"));
        assert_eq!(r.cells.as_deref(), Some("A2:P100"));
        assert_eq!(r.first_row, 2);
        assert_eq!(r.describe_row(0), "row 2 of sheet 'Team Performance'");
        Ok(())
    }

    #[test]
    fn quoted_sheet_names() -> anyhow::Result<()> {
        let r = A1Range::parse("'Agent''s Sheet'!B3:F")?;
        assert_eq!(r.sheet.as_deref(), Some("Agent's Sheet"));
        assert_eq!(r.first_row, 3);
        assert_eq!(r.to_string(), "'Agent''s Sheet'!B3:F");
        Ok(())
    }

    #[test]
    fn cells_only_and_sheet_only() -> anyhow::Result<()> {
        let r = A1Range::parse("A1:B2")?;
        assert_eq!(r.sheet, None);
        assert_eq!(r.describe_row(3), "row 4");

        let r = A1Range::parse("Sheet1")?;
        assert_eq!(r.sheet.as_deref(), Some("Sheet1"));
        assert_eq!(r.cells, None);
        assert_eq!(r.first_row, 1);

        let r = A1Range::parse("Data!A:P")?;
        assert_eq!(r.first_row, 1);
        Ok(())
    }

    #[test]
    fn malformed_ranges() {
        for bad in ["", "  ", "Sheet!", "!A1", "Sheet!A1:", "Sheet!A0", "Sheet!1A", "Bad'Name!A1"] {
            assert!(
                matches!(A1Range::parse(bad), Err(IngestError::InvalidRange { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
