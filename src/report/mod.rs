//! Dashboard-side views over a fetched record set: totals, team grouping,
//! roster-based team assignment and productivity ranking.

pub mod aggregate;
pub mod roster;

pub use aggregate::{summarize, summarize_by_team, Totals};
pub use roster::{assign_teams, filter_team, rank_by_productivity, Roster, RosterEntry};
