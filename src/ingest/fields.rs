// src/ingest/fields.rs

use serde::{Deserialize, Serialize};

/// Numeric metrics of a performance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Audits,
    QaScore,
    EmailsSent,
    Chats,
    CallsInbound,
    CallsOutbound,
    CallsTotal,
    Total,
    ChatsSec,
    EmailsHrs,
    Surveys,
    Csat,
    Dsat,
    CSatScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Quality,
    Productivity,
    Frt,
    Csat,
}

/// How a metric cell is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRule {
    /// Plain number, see [`to_number`](super::cell::to_number).
    Number,
    /// Percentage-aware ratio, see [`to_score`](super::cell::to_score).
    Score,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::Audits,
        Field::QaScore,
        Field::EmailsSent,
        Field::Chats,
        Field::CallsInbound,
        Field::CallsOutbound,
        Field::CallsTotal,
        Field::Total,
        Field::ChatsSec,
        Field::EmailsHrs,
        Field::Surveys,
        Field::Csat,
        Field::Dsat,
        Field::CSatScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Audits => "audits",
            Field::QaScore => "qaScore",
            Field::EmailsSent => "emailsSent",
            Field::Chats => "chats",
            Field::CallsInbound => "callsInbound",
            Field::CallsOutbound => "callsOutbound",
            Field::CallsTotal => "callsTotal",
            Field::Total => "total",
            Field::ChatsSec => "chatsSec",
            Field::EmailsHrs => "emailsHrs",
            Field::Surveys => "surveys",
            Field::Csat => "csat",
            Field::Dsat => "dsat",
            Field::CSatScore => "cSatScore",
        }
    }

    pub fn group(&self) -> Group {
        match self {
            Field::Audits | Field::QaScore | Field::EmailsSent => Group::Quality,
            Field::Chats
            | Field::CallsInbound
            | Field::CallsOutbound
            | Field::CallsTotal
            | Field::Total => Group::Productivity,
            Field::ChatsSec | Field::EmailsHrs => Group::Frt,
            Field::Surveys | Field::Csat | Field::Dsat | Field::CSatScore => Group::Csat,
        }
    }

    pub fn rule(&self) -> ParseRule {
        match self {
            Field::QaScore | Field::CSatScore => ParseRule::Score,
            _ => ParseRule::Number,
        }
    }

    /// Header labels recognised for this metric, highest priority first.
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Audits => &["Audits"],
            Field::QaScore => &["QA Score"],
            Field::EmailsSent => &["E-mails Sent", "Emails Sent"],
            Field::Chats => &["Chats"],
            Field::CallsInbound => &["Inbound"],
            Field::CallsOutbound => &["Outbound"],
            Field::CallsTotal => &["Total Calls", "Total"],
            Field::Total => &["Total Prod.", "Total Productivity"],
            Field::ChatsSec => &["Chats (sec.)", "Chats (sec)"],
            Field::EmailsHrs => &["E-mails (Hrs)", "Emails (Hrs)"],
            Field::Surveys => &["Surveys", "Surveys volume"],
            Field::Csat => &["CSAT"],
            Field::Dsat => &["DSAT"],
            Field::CSatScore => &["C-Sat Score", "CSAT Score"],
        }
    }
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Quality => "quality",
            Group::Productivity => "productivity",
            Group::Frt => "frt",
            Group::Csat => "csat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_record_keys() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn only_ratio_fields_use_score_rule() {
        let scores: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| f.rule() == ParseRule::Score)
            .collect();
        assert_eq!(scores, vec![Field::QaScore, Field::CSatScore]);
    }

    #[test]
    fn every_field_has_aliases() {
        for field in Field::ALL {
            assert!(!field.default_aliases().is_empty(), "{:?}", field);
        }
    }
}
