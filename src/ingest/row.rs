// src/ingest/row.rs

use tracing::trace;

use super::{
    aliases::AliasTables,
    cell::{to_number, to_score, to_text},
    fields::{Field, ParseRule},
    header::HeaderMap,
    names::canonical_name,
    types::{Cell, PerformanceRecord},
};

/// Team used when the sheet has no team value for a row.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

static EMPTY: Cell = Cell::Empty;

/// Column positions resolved once from the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    pub agent_name: usize,
    pub team: Option<usize>,
    pub month: Option<usize>,
    pub fields: Vec<(Field, Option<usize>)>,
}

impl ColumnPlan {
    /// `None` when no agent-name alias is present in the header row.
    pub fn resolve(headers: &HeaderMap, tables: &AliasTables) -> Option<Self> {
        let agent_name = headers.resolve(&tables.agent_name)?;
        let fields = Field::ALL
            .into_iter()
            .map(|f| (f, headers.resolve(tables.header_aliases(f))))
            .collect();
        Some(Self {
            agent_name,
            team: headers.resolve(&tables.team),
            month: headers.resolve(&tables.month),
            fields,
        })
    }

    pub fn missing_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|(_, col)| col.is_none())
            .map(|(f, _)| *f)
    }
}

/// Turns data rows into records using a resolved [`ColumnPlan`].
pub struct RowProjector<'a> {
    plan: &'a ColumnPlan,
    tables: &'a AliasTables,
    default_month: &'a str,
}

impl<'a> RowProjector<'a> {
    pub fn new(plan: &'a ColumnPlan, tables: &'a AliasTables, default_month: &'a str) -> Self {
        Self {
            plan,
            tables,
            default_month,
        }
    }

    /// Project the `index`-th data row (counted from just below the header).
    /// Returns `None` for rows without an agent name or with nothing but blanks.
    pub fn project(&self, index: usize, row: &[Cell]) -> Option<PerformanceRecord> {
        let cell = |col: Option<usize>| col.and_then(|c| row.get(c)).unwrap_or(&EMPTY);

        let name_cell = cell(Some(self.plan.agent_name));
        if name_cell.is_blank() || row.iter().all(Cell::is_blank) {
            trace!(row = index, "skipping blank row");
            return None;
        }

        let agent_name = canonical_name(to_text(name_cell).as_deref(), self.tables);
        let team = to_text(cell(self.plan.team)).unwrap_or_else(|| UNASSIGNED_TEAM.to_string());
        let month = to_text(cell(self.plan.month)).unwrap_or_else(|| self.default_month.to_string());

        let mut record =
            PerformanceRecord::new(format!("sheet-agent-{}", index), agent_name, team, month);
        for (field, col) in &self.plan.fields {
            let raw = cell(*col);
            let value = match field.rule() {
                ParseRule::Number => to_number(raw),
                ParseRule::Score => to_score(raw),
            };
            record.set(*field, value);
        }
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    fn plan_for(header: &[&str], tables: &AliasTables) -> ColumnPlan {
        ColumnPlan::resolve(&HeaderMap::from_row(&row(header)), tables).expect("agent column")
    }

    #[test]
    fn plan_requires_agent_name_column() {
        let tables = AliasTables::default();
        let headers = HeaderMap::from_row(&row(&["Team", "Audits"]));
        assert!(ColumnPlan::resolve(&headers, &tables).is_none());

        // `Name` is an accepted alias even though it is not the marker
        let plan = plan_for(&["Team", "Name"], &tables);
        assert_eq!(plan.agent_name, 1);
        assert_eq!(plan.team, Some(0));
        assert_eq!(plan.missing_fields().count(), Field::ALL.len());
    }

    #[test]
    fn lead_column_takes_priority_for_team() {
        let tables = AliasTables::default();
        let plan = plan_for(&["Team", "Agent Name", "Lead"], &tables);
        assert_eq!(plan.team, Some(2));
    }

    #[test]
    fn projects_full_row() {
        let tables = AliasTables::default();
        let plan = plan_for(
            &[
                "Lead", "Agent Name", "Month", "Audits", "QA Score", "E-mails Sent", "Chats",
                "Inbound", "Outbound", "Total Calls", "Total Prod.", "Chats (sec.)",
                "E-mails (Hrs)", "Surveys", "CSAT", "DSAT", "C-Sat Score",
            ],
            &tables,
        );
        let projector = RowProjector::new(&plan, &tables, "January");
        let r = projector
            .project(
                4,
                &row(&[
                    "Social", "esraa tarek", "May", "12", "97%", "1,204", "310", "45", "-",
                    "45", "1,559", "38", "2.5", "80", "76", "4", "95",
                ]),
            )
            .expect("record");

        assert_eq!(r.agent_id, "sheet-agent-4");
        assert_eq!(r.agent_name, "Esraa Tarek Eroq");
        assert_eq!(r.team, "Social");
        assert_eq!(r.month, "May");
        assert_eq!(r.quality.audits, Some(12.0));
        assert_eq!(r.quality.qa_score, Some(0.97));
        assert_eq!(r.quality.emails_sent, Some(1204.0));
        assert_eq!(r.productivity.calls_outbound, None);
        assert_eq!(r.productivity.total, Some(1559.0));
        assert_eq!(r.frt.emails_hrs, Some(2.5));
        assert_eq!(r.csat.c_sat_score, Some(0.95));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn name_only_row_has_all_metrics_absent() {
        let tables = AliasTables::default();
        let plan = plan_for(&["Team", "Agent Name", "QA Score", "Audits"], &tables);
        let projector = RowProjector::new(&plan, &tables, "March");
        let r = projector.project(0, &row(&["", "jane doe", "", ""])).expect("record");
        assert_eq!(r.team, UNASSIGNED_TEAM);
        assert_eq!(r.month, "March");
        for field in Field::ALL {
            assert_eq!(r.get(field), None, "{:?}", field);
        }
    }

    #[test]
    fn short_rows_are_padded() {
        let tables = AliasTables::default();
        let plan = plan_for(&["Agent Name", "Audits", "DSAT"], &tables);
        let projector = RowProjector::new(&plan, &tables, "March");
        let r = projector.project(1, &row(&["amy", "3"])).expect("record");
        assert_eq!(r.quality.audits, Some(3.0));
        assert_eq!(r.csat.dsat, None);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let tables = AliasTables::default();
        let plan = plan_for(&["Team", "Agent Name", "QA Score"], &tables);
        let projector = RowProjector::new(&plan, &tables, "March");
        assert!(projector.project(0, &row(&["-", "-", "-"])).is_none());
        assert!(projector.project(1, &row(&["Social", "", "90%"])).is_none());
        assert!(projector.project(2, &[]).is_none());
    }
}
