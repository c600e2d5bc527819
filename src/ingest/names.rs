// src/ingest/names.rs

use super::aliases::{name_key, AliasTables};

/// Placeholder name for rows whose name cell is blank.
pub const UNKNOWN_AGENT: &str = "Unknown";

/// Canonical display name for a raw agent-name cell.
///
/// Known aliases map verbatim, anything else is title-cased word by word.
pub fn canonical_name(raw: Option<&str>, tables: &AliasTables) -> String {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_AGENT);
    let key = name_key(raw);
    match tables.canonical_for(&key) {
        Some(canonical) => canonical.to_string(),
        None => title_case(&key),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
