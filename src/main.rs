use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use perfsheet::{
    fetch::{SheetsClient, ValueRender},
    ingest::{AliasTables, Ingestor, PerformanceRecord},
    report::{self, Roster, Totals},
    CredentialConfig,
};
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch agent performance data from Google Sheets and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "perfsheet", version)]
struct Args {
    /// Spreadsheet id (the long token in the sheet's URL).
    #[arg(long)]
    sheet_id: String,

    /// Range in A1 notation, e.g. "Team Performance!A2:P100". Repeat to fetch several.
    #[arg(long = "range", required = true)]
    ranges: Vec<String>,

    /// YAML file overriding header / name alias tables.
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// YAML roster whose teams replace the sheet's team column.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Only keep agents of this team.
    #[arg(long)]
    team: Option<String>,

    /// Sort agents by total productivity, highest first.
    #[arg(long)]
    rank: bool,

    /// Add overall and per-team totals.
    #[arg(long)]
    summary: bool,

    /// Ask the Sheets API for raw numbers instead of displayed text.
    #[arg(long)]
    unformatted: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeReport<'a> {
    range: &'a str,
    records: Vec<PerformanceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<Totals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_team: Option<BTreeMap<String, Totals>>,
}

fn build_report<'a>(
    args: &Args,
    range: &'a str,
    records: Vec<PerformanceRecord>,
    roster: Option<&Roster>,
) -> RangeReport<'a> {
    let records = match roster {
        Some(roster) => report::assign_teams(&records, roster),
        None => records,
    };
    let mut records: Vec<PerformanceRecord> = report::filter_team(&records, args.team.as_deref())
        .cloned()
        .collect();
    if args.rank {
        records = report::rank_by_productivity(&records)
            .into_iter()
            .cloned()
            .collect();
    }

    let (totals, by_team) = if args.summary {
        (
            Some(report::summarize(&records)),
            Some(report::summarize_by_team(&records)),
        )
    } else {
        (None, None)
    };

    RangeReport {
        range,
        records,
        totals,
        by_team,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,perfsheet=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) load configuration ───────────────────────────────────────
    let tables = match &args.aliases {
        Some(path) => AliasTables::load(path)
            .with_context(|| format!("loading alias tables from {}", path.display()))?,
        None => AliasTables::default(),
    };
    let roster = args
        .roster
        .as_ref()
        .map(|path| {
            Roster::load(path).with_context(|| format!("loading roster from {}", path.display()))
        })
        .transpose()?;
    let credentials = CredentialConfig::from_env();

    // ─── 3) connect ──────────────────────────────────────────────────
    let render = if args.unformatted {
        ValueRender::Unformatted
    } else {
        ValueRender::Formatted
    };
    let client = SheetsClient::connect(&credentials)
        .await
        .context("connecting to Google Sheets")?
        .with_value_render(render);
    let ingestor = Ingestor::new(client, Arc::new(tables));

    // ─── 4) fetch every range independently ──────────────────────────
    let results = join_all(
        args.ranges
            .iter()
            .map(|range| ingestor.fetch_and_normalize(&args.sheet_id, range)),
    )
    .await;

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (range, result) in args.ranges.iter().zip(results) {
        match result {
            Ok(records) => {
                info!(range = %range, records = records.len(), "fetched");
                reports.push(build_report(&args, range, records, roster.as_ref()));
            }
            Err(e) => {
                error!(range = %range, error = %e, "fetch failed");
                failures += 1;
            }
        }
    }

    // ─── 5) print ────────────────────────────────────────────────────
    println!("{}", serde_json::to_string_pretty(&reports)?);

    if failures > 0 {
        anyhow::bail!("{} of {} ranges failed", failures, args.ranges.len());
    }
    Ok(())
}
