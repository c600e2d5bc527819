// src/report/aggregate.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::ingest::PerformanceRecord;

/// Column totals over a set of records, as shown in the footer of the
/// performance table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub agents: usize,
    pub audits: f64,
    pub emails_sent: f64,
    pub chats: f64,
    pub calls_inbound: f64,
    pub calls_outbound: f64,
    pub calls_total: f64,
    pub productivity_total: f64,
    pub surveys: f64,
    pub csat: f64,
    pub dsat: f64,
    /// QA score averaged with each agent's audit count as weight.
    pub avg_qa_score: Option<f64>,
    /// C-Sat score averaged with each agent's survey count as weight.
    pub avg_c_sat_score: Option<f64>,
}

#[derive(Default)]
struct WeightedMean {
    sum: f64,
    weight: f64,
}

impl WeightedMean {
    fn add(&mut self, value: Option<f64>, weight: Option<f64>) {
        if let (Some(v), Some(w)) = (value, weight) {
            self.sum += v * w;
            self.weight += w;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.weight > 0.0).then(|| self.sum / self.weight)
    }
}

pub fn summarize<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let mut t = Totals::default();
    let mut qa = WeightedMean::default();
    let mut c_sat = WeightedMean::default();
    let v = |x: Option<f64>| x.unwrap_or(0.0);

    for r in records {
        t.agents += 1;
        t.audits += v(r.quality.audits);
        t.emails_sent += v(r.quality.emails_sent);
        t.chats += v(r.productivity.chats);
        t.calls_inbound += v(r.productivity.calls_inbound);
        t.calls_outbound += v(r.productivity.calls_outbound);
        t.calls_total += v(r.productivity.calls_total);
        t.productivity_total += v(r.productivity.total);
        t.surveys += v(r.csat.surveys);
        t.csat += v(r.csat.csat);
        t.dsat += v(r.csat.dsat);
        qa.add(r.quality.qa_score, r.quality.audits);
        c_sat.add(r.csat.c_sat_score, r.csat.surveys);
    }

    t.avg_qa_score = qa.mean();
    t.avg_c_sat_score = c_sat.mean();
    t
}

/// [`summarize`] per team, teams in name order.
pub fn summarize_by_team(records: &[PerformanceRecord]) -> BTreeMap<String, Totals> {
    let mut by_team: BTreeMap<&str, Vec<&PerformanceRecord>> = BTreeMap::new();
    for r in records {
        by_team.entry(r.team.as_str()).or_default().push(r);
    }
    by_team
        .into_iter()
        .map(|(team, rs)| (team.to_string(), summarize(rs)))
        .collect()
}
