//! Command-line page-view report.
//!
//! Builds the same report as the web page and prints it as a text table or
//! as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Default range and limit (REPORT_* variables), rows from PostgreSQL
//! cargo run --bin report
//!
//! # Custom range, top 10
//! cargo run --bin report -- --start 2021-01-01 --end 2021-06-30 --limit 10
//!
//! # Rows from a JSON fixture instead of the database
//! cargo run --bin report -- --fixture rows.json --format json
//!
//! # Pin "today" for reproducible output
//! cargo run --bin report -- --fixture rows.json --now 2021-12-31T02:00:00Z
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): required unless `--fixture` is given
//! - `REPORT_START_DATE`, `REPORT_END_DATE`, `REPORT_MAX_RESULTS`: defaults for the query
//! - `RUST_LOG`: log filter (default `warn`); logs go to stderr

use pageview_report::api::dto::report::ReportResponse;
use pageview_report::application::services::ReportService;
use pageview_report::config::Config;
use pageview_report::domain::repositories::{PageviewRepository, ReportQuery};
use pageview_report::infrastructure::cache::NullCache;
use pageview_report::infrastructure::persistence::{
    InMemoryPageviewRepository, PgPageviewRepository,
};
use pageview_report::{telemetry, terminal};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use colored::*;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// Prints the top pages by page views for a date range.
#[derive(Parser)]
#[command(name = "report")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First day of the range (YYYY-MM-DD)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Maximum number of rows (1-1000)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Read rows from a JSON file instead of the database
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Instant to treat as "now" (RFC 3339), defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    telemetry::init(&log_level, "text")?;

    let query = resolve_query(&cli)?;
    let repository = open_repository(cli.fixture.as_ref()).await?;
    let service = ReportService::new(repository, Arc::new(NullCache::new()));

    let report = service
        .build_report(query, cli.now.unwrap_or_else(Utc::now))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build report: {e}"))?;

    match cli.format {
        Format::Text => print!("{}", terminal::render_text(&report)),
        Format::Json => {
            let response = ReportResponse::from(report);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Applies command-line overrides on top of the configured default query.
fn resolve_query(cli: &Cli) -> Result<ReportQuery> {
    let defaults = Config::load_default_query()?;

    ReportQuery::new(
        cli.start.unwrap_or(defaults.start_date),
        cli.end.unwrap_or(defaults.end_date),
        cli.limit.unwrap_or(defaults.max_results),
    )
    .map_err(|e| anyhow::anyhow!("Invalid report query: {e}"))
}

async fn open_repository(fixture: Option<&PathBuf>) -> Result<Arc<dyn PageviewRepository>> {
    if let Some(path) = fixture {
        eprintln!("{} {}", "Using fixture".bright_black(), path.display());
        return Ok(Arc::new(InMemoryPageviewRepository::from_json_file(path)?));
    }

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(Arc::new(PgPageviewRepository::new(Arc::new(pool))))
}
