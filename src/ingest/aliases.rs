// src/ingest/aliases.rs

use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, warn};

use super::fields::Field;
use crate::error::IngestError;

const DEFAULT_MARKER: &str = "Agent Name";
const AGENT_NAME_ALIASES: &[&str] = &["Agent Name", "Agent", "Name"];
const TEAM_ALIASES: &[&str] = &["Lead", "Team"];
const MONTH_ALIASES: &[&str] = &["Month"];

/// Known misspellings / short forms → canonical display name.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("esraa tarek", "Esraa Tarek Eroq"),
    ("rima khaled", "Rima Zaki"),
    ("ashraf aboelmagd", "Ashraf Essam"),
    ("mohamed khier", "Mohamed Kheer"),
    ("ahmed ezz eldin", "Ahmed Ezz ElDin"),
    ("marwan zakrya", "Marwan Zakaria"),
];

/// Hand-maintained lookup tables driving header matching and name canonicalization.
///
/// Built once and shared read-only by every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTables {
    /// Label that identifies the header row.
    pub marker: String,
    pub agent_name: Vec<String>,
    pub team: Vec<String>,
    pub month: Vec<String>,
    pub headers: BTreeMap<Field, Vec<String>>,
    /// Keys are lower-cased with single spaces.
    pub names: BTreeMap<String, String>,
}

/// Partial tables as written in a YAML override file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct AliasOverrides {
    marker: Option<String>,
    agent_name: Option<Vec<String>>,
    team: Option<Vec<String>>,
    month: Option<Vec<String>>,
    headers: BTreeMap<Field, Vec<String>>,
    names: BTreeMap<String, String>,
}

pub(crate) fn name_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTables {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            agent_name: owned(AGENT_NAME_ALIASES),
            team: owned(TEAM_ALIASES),
            month: owned(MONTH_ALIASES),
            headers: Field::ALL
                .into_iter()
                .map(|f| (f, owned(f.default_aliases())))
                .collect(),
            names: NAME_ALIASES
                .iter()
                .map(|(k, v)| (name_key(k), v.to_string()))
                .collect(),
        }
    }
}

impl AliasTables {
    pub fn from_yaml_str(text: &str) -> Result<Self, IngestError> {
        let overrides: AliasOverrides = serde_yaml::from_str(text)
            .map_err(|e| IngestError::Configuration(format!("invalid alias tables: {}", e)))?;
        Ok(Self::default().merged(overrides))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            IngestError::Configuration(format!("reading alias tables {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded alias tables");
        Self::from_yaml_str(&text)
    }

    /// Header aliases for `field`, highest priority first.
    pub fn header_aliases(&self, field: Field) -> &[String] {
        self.headers.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical display name for an already lower-cased, space-normalized key.
    pub fn canonical_for(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    // Header lists replace per entry, name aliases add to the built-ins.
    fn merged(mut self, o: AliasOverrides) -> Self {
        if let Some(marker) = o.marker.filter(|m| !m.trim().is_empty()) {
            self.marker = marker;
        }
        replace_list(&mut self.agent_name, o.agent_name, "agentName");
        replace_list(&mut self.team, o.team, "team");
        replace_list(&mut self.month, o.month, "month");
        for (field, list) in o.headers {
            let slot = self.headers.entry(field).or_default();
            replace_list(slot, Some(list), field.as_str());
        }
        for (raw, canonical) in o.names {
            let key = name_key(&raw);
            if key.is_empty() || canonical.trim().is_empty() {
                warn!(alias = %raw, "ignoring blank name alias");
                continue;
            }
            self.names.insert(key, canonical.trim().to_string());
        }
        self
    }
}

fn replace_list(slot: &mut Vec<String>, list: Option<Vec<String>>, what: &str) {
    let Some(list) = list else { return };
    let list: Vec<String> = list.into_iter().filter(|s| !s.trim().is_empty()).collect();
    if list.is_empty() {
        warn!(column = what, "empty alias list in overrides; keeping built-in aliases");
    } else {
        *slot = list;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_cover_every_field() {
        let t = AliasTables::default();
        assert_eq!(t.marker, "Agent Name");
        for field in Field::ALL {
            assert!(!t.header_aliases(field).is_empty());
        }
        assert_eq!(t.canonical_for("esraa tarek"), Some("Esraa Tarek Eroq"));
    }

    #[test]
    fn yaml_overrides_merge_with_defaults() -> anyhow::Result<()> {
        let yaml = r#"
headers:
  qaScore: ["Quality %", "QA Score"]
names:
  "  JOHN   Smyth ": John Smith
team: [Squad]
"#;
        let t = AliasTables::from_yaml_str(yaml)?;
        assert_eq!(t.header_aliases(Field::QaScore), ["Quality %", "QA Score"]);
        // untouched fields keep the built-ins
        assert_eq!(t.header_aliases(Field::Audits), ["Audits"]);
        assert_eq!(t.team, ["Squad"]);
        assert_eq!(t.month, ["Month"]);
        assert_eq!(t.canonical_for("john smyth"), Some("John Smith"));
        assert_eq!(t.canonical_for("rima khaled"), Some("Rima Zaki"));
        Ok(())
    }

    #[test]
    fn empty_override_lists_are_ignored() -> anyhow::Result<()> {
        let t = AliasTables::from_yaml_str("agentName: []\nheaders:\n  dsat: ['  ']\n")?;
        assert_eq!(t.agent_name, ["Agent Name", "Agent", "Name"]);
        assert_eq!(t.header_aliases(Field::Dsat), ["DSAT"]);
        Ok(())
    }

    #[test]
    fn unknown_keys_are_configuration_errors() {
        let err = AliasTables::from_yaml_str("headerz: {}\n").unwrap_err();
        assert!(matches!(err, IngestError::Configuration(_)));
        let err = AliasTables::from_yaml_str("headers:\n  notAField: [X]\n").unwrap_err();
        assert!(matches!(err, IngestError::Configuration(_)));
    }

    #[test]
    fn loads_from_file() -> anyhow::Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "marker: Agent")?;
        let t = AliasTables::load(f.path())?;
        assert_eq!(t.marker, "Agent");
        assert!(AliasTables::load("/no/such/aliases.yaml").is_err());
        Ok(())
    }
}
