// src/ingest/types.rs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::fields::Field;
use crate::error::IngestError;

/// One raw spreadsheet cell as delivered by the remote read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

/// Rows of raw cells, exactly as fetched. Rows may have different lengths.
pub type RawSheet = Vec<Vec<Cell>>;

/// Cell text used for the "nothing here" placeholder.
pub const PLACEHOLDER: &str = "-";

impl Cell {
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Cell::Empty,
            Value::String(s) if s.is_empty() => Cell::Empty,
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Text form of the cell, `None` when empty.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Cell::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }

    /// Empty, whitespace-only, or the `-` placeholder.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => {
                let t = s.trim();
                t.is_empty() || t == PLACEHOLDER
            }
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    pub audits: Option<f64>,
    pub qa_score: Option<f64>,
    pub emails_sent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Productivity {
    pub chats: Option<f64>,
    pub calls_inbound: Option<f64>,
    pub calls_outbound: Option<f64>,
    pub calls_total: Option<f64>,
    pub total: Option<f64>,
}

/// First response times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frt {
    pub chats_sec: Option<f64>,
    pub emails_hrs: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Csat {
    pub surveys: Option<f64>,
    pub csat: Option<f64>,
    pub dsat: Option<f64>,
    pub c_sat_score: Option<f64>,
}

/// One agent's row of the performance sheet, normalized.
///
/// `agent_id` is only unique inside the collection it was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub agent_id: String,
    pub agent_name: String,
    pub team: String,
    pub month: String,
    pub quality: Quality,
    pub productivity: Productivity,
    pub frt: Frt,
    pub csat: Csat,
}

impl PerformanceRecord {
    /// A record with every metric absent.
    pub fn new(agent_id: String, agent_name: String, team: String, month: String) -> Self {
        Self {
            agent_id,
            agent_name,
            team,
            month,
            quality: Quality::default(),
            productivity: Productivity::default(),
            frt: Frt::default(),
            csat: Csat::default(),
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        *self.slot(field)
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: Field) -> &Option<f64> {
        match field {
            Field::Audits => &self.quality.audits,
            Field::QaScore => &self.quality.qa_score,
            Field::EmailsSent => &self.quality.emails_sent,
            Field::Chats => &self.productivity.chats,
            Field::CallsInbound => &self.productivity.calls_inbound,
            Field::CallsOutbound => &self.productivity.calls_outbound,
            Field::CallsTotal => &self.productivity.calls_total,
            Field::Total => &self.productivity.total,
            Field::ChatsSec => &self.frt.chats_sec,
            Field::EmailsHrs => &self.frt.emails_hrs,
            Field::Surveys => &self.csat.surveys,
            Field::Csat => &self.csat.csat,
            Field::Dsat => &self.csat.dsat,
            Field::CSatScore => &self.csat.c_sat_score,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::Audits => &mut self.quality.audits,
            Field::QaScore => &mut self.quality.qa_score,
            Field::EmailsSent => &mut self.quality.emails_sent,
            Field::Chats => &mut self.productivity.chats,
            Field::CallsInbound => &mut self.productivity.calls_inbound,
            Field::CallsOutbound => &mut self.productivity.calls_outbound,
            Field::CallsTotal => &mut self.productivity.calls_total,
            Field::Total => &mut self.productivity.total,
            Field::ChatsSec => &mut self.frt.chats_sec,
            Field::EmailsHrs => &mut self.frt.emails_hrs,
            Field::Surveys => &mut self.csat.surveys,
            Field::Csat => &mut self.csat.csat,
            Field::Dsat => &mut self.csat.dsat,
            Field::CSatScore => &mut self.csat.c_sat_score,
        }
    }

    /// Check the record against the output schema: non-empty identity strings and
    /// every present metric finite.
    pub fn validate(&self) -> Result<(), IngestError> {
        let fail = |reason: String| IngestError::InvalidRecord {
            agent_id: self.agent_id.clone(),
            reason,
        };

        for (name, value) in [
            ("agentId", &self.agent_id),
            ("agentName", &self.agent_name),
            ("team", &self.team),
            ("month", &self.month),
        ] {
            if value.trim().is_empty() {
                return Err(fail(format!("`{}` is empty", name)));
            }
        }

        for field in Field::ALL {
            if let Some(v) = self.get(field) {
                if !v.is_finite() {
                    return Err(fail(format!(
                        "`{}.{}` is not a finite number ({})",
                        field.group().as_str(),
                        field.as_str(),
                        v
                    )));
                }
            }
        }
        Ok(())
    }
}
