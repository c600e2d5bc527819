// src/report/roster.rs

use serde::Deserialize;
use std::{cmp::Ordering, collections::HashMap, fs, path::Path};
use tracing::debug;

use crate::error::IngestError;
use crate::ingest::{aliases::name_key, PerformanceRecord};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub team: String,
}

/// Agents known to the dashboard, with the team each one belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Roster {
    pub agents: Vec<RosterEntry>,
}

impl Roster {
    pub fn from_yaml_str(text: &str) -> Result<Self, IngestError> {
        serde_yaml::from_str(text)
            .map_err(|e| IngestError::Configuration(format!("invalid roster: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            IngestError::Configuration(format!("reading roster {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }
}

/// Copy of `records` where each agent found in the roster (name compared
/// case-insensitively) takes the roster's team.
pub fn assign_teams(records: &[PerformanceRecord], roster: &Roster) -> Vec<PerformanceRecord> {
    let teams: HashMap<String, &str> = roster
        .agents
        .iter()
        .filter(|a| !a.team.trim().is_empty())
        .map(|a| (name_key(&a.name), a.team.trim()))
        .collect();

    records
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if let Some(team) = teams.get(&name_key(&r.agent_name)) {
                debug!(agent = %r.agent_name, from = %r.team, to = %team, "roster team");
                r.team = team.to_string();
            }
            r
        })
        .collect()
}

/// Records of one team, or all of them when `team` is `None`.
pub fn filter_team<'a>(
    records: &'a [PerformanceRecord],
    team: Option<&'a str>,
) -> impl Iterator<Item = &'a PerformanceRecord> + 'a {
    records
        .iter()
        .filter(move |r| team.map_or(true, |t| r.team == t))
}

/// Highest total productivity first; missing totals rank as 0. Ties keep sheet order.
pub fn rank_by_productivity(records: &[PerformanceRecord]) -> Vec<&PerformanceRecord> {
    let mut ranked: Vec<&PerformanceRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        let (a, b) = (
            a.productivity.total.unwrap_or(0.0),
            b.productivity.total.unwrap_or(0.0),
        );
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: usize, name: &str, team: &str, total: Option<f64>) -> PerformanceRecord {
        let mut r = PerformanceRecord::new(
            format!("sheet-agent-{}", id),
            name.into(),
            team.into(),
            "May".into(),
        );
        r.productivity.total = total;
        r
    }

    #[test]
    fn roster_team_overrides_sheet_team() -> anyhow::Result<()> {
        let roster = Roster::from_yaml_str(
            r#"
agents:
  - { name: "john SMITH ", team: Calls }
  - { name: Amy Lee, team: "" }
"#,
        )?;
        let records = vec![
            agent(0, "John Smith", "Social", None),
            agent(1, "Amy Lee", "Social", None),
            agent(2, "Zed", "Unassigned", None),
        ];
        let out = assign_teams(&records, &roster);
        assert_eq!(out[0].team, "Calls");
        assert_eq!(out[1].team, "Social");
        assert_eq!(out[2].team, "Unassigned");
        // input untouched
        assert_eq!(records[0].team, "Social");
        Ok(())
    }

    #[test]
    fn team_filter() {
        let records = vec![
            agent(0, "a", "Social", None),
            agent(1, "b", "Calls", None),
            agent(2, "c", "Social", None),
        ];
        let social: Vec<&str> = filter_team(&records, Some("Social"))
            .map(|r| r.agent_name.as_str())
            .collect();
        assert_eq!(social, ["a", "c"]);
        assert_eq!(filter_team(&records, None).count(), 3);
    }

    #[test]
    fn ranking_puts_missing_totals_last_and_is_stable() {
        let records = vec![
            agent(0, "a", "T", None),
            agent(1, "b", "T", Some(20.0)),
            agent(2, "c", "T", Some(50.0)),
            agent(3, "d", "T", Some(0.0)),
        ];
        let order: Vec<&str> = rank_by_productivity(&records)
            .into_iter()
            .map(|r| r.agent_name.as_str())
            .collect();
        assert_eq!(order, ["c", "b", "a", "d"]);
    }

    #[test]
    fn bad_roster_yaml() {
        assert!(matches!(
            Roster::from_yaml_str("agents: 3"),
            Err(IngestError::Configuration(_))
        ));
    }
}
