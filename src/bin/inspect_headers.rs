// src/bin/inspect_headers.rs
//
// Shows which sheet row is taken as the header and which column each metric
// resolves to, so spreadsheet maintainers can check their column titles.

use anyhow::{Context, Result};
use clap::Parser;
use perfsheet::{
    fetch::{SheetSource, SheetsClient},
    ingest::{find_header_row, AliasTables, ColumnPlan, HeaderMap},
    CredentialConfig,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "inspect_headers")]
struct Args {
    #[arg(long)]
    sheet_id: String,

    #[arg(long)]
    range: String,

    #[arg(long)]
    aliases: Option<PathBuf>,
}

/// Spreadsheet column letters for a zero-based index (0 → A, 26 → AA).
fn column_letter(mut idx: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let tables = match &args.aliases {
        Some(path) => AliasTables::load(path)?,
        None => AliasTables::default(),
    };

    let client = SheetsClient::connect(&CredentialConfig::from_env())
        .await
        .context("connecting to Google Sheets")?;
    let rows = client
        .read_range(&args.sheet_id, &args.range)
        .await
        .with_context(|| format!("reading {}", args.range))?;
    println!("{} rows fetched from {}", rows.len(), args.range);

    let Some(header_idx) = find_header_row(&rows, &tables.marker) else {
        println!("no row contains '{}'", tables.marker);
        return Ok(());
    };
    println!("header row: {} (offset within range)", header_idx);

    let headers = HeaderMap::from_row(&rows[header_idx]);
    let Some(plan) = ColumnPlan::resolve(&headers, &tables) else {
        println!("no agent-name column among {:?}", tables.agent_name);
        return Ok(());
    };

    let show = |col: Option<usize>| col.map_or("-".to_string(), column_letter);
    println!("{:<14} {}", "agentName", column_letter(plan.agent_name));
    println!("{:<14} {}", "team", show(plan.team));
    println!("{:<14} {}", "month", show(plan.month));
    for (field, col) in &plan.fields {
        println!(
            "{:<14} {:<4} {}",
            field.as_str(),
            show(*col),
            tables.header_aliases(*field).join(" | ")
        );
    }
    Ok(())
}
