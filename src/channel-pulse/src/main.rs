//! ChannelPulse — uniform performance-report retrieval across ad channels.
//!
//! CLI entry point: loads credentials from the environment, runs one fetch
//! against the requested channel, and writes the normalized report to
//! stdout.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, ValueEnum};
use pulse_core::config::AppConfig;
use pulse_fetcher::{ChannelPerformanceFetcher, FetchTracker};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "channel-pulse")]
#[command(about = "Uniform performance-report retrieval across ad channels")]
#[command(version)]
struct Cli {
    /// Channel to fetch from (apple_search_ads, google_ads, snapchat)
    #[arg(long)]
    channel: String,

    /// Time granularity (hourly, daily); overrides config
    #[arg(long, env = "CHANNEL_PULSE__FETCH__TIME_GRANULARITY")]
    time_granularity: Option<String>,

    /// Entity granularity (campaign, adgroup, ad); overrides config
    #[arg(long, env = "CHANNEL_PULSE__FETCH__ENTITY_GRANULARITY")]
    entity_granularity: Option<String>,

    /// Requested raw performance columns, comma separated
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// First day of the report range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the report range (YYYY-MM-DD, exclusive)
    #[arg(long)]
    end: NaiveDate,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn main() -> anyhow::Result<()> {
    // The report itself goes to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "channel_pulse=info,pulse_fetcher=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let time_granularity = cli
        .time_granularity
        .unwrap_or_else(|| config.fetch.time_granularity.clone());
    let entity_granularity = cli
        .entity_granularity
        .unwrap_or_else(|| config.fetch.entity_granularity.clone());
    let columns = if cli.columns.is_empty() {
        config.fetch.performance_columns.clone()
    } else {
        cli.columns.clone()
    };

    let tracker = Arc::new(FetchTracker::new());
    let fetcher = ChannelPerformanceFetcher::new(
        &cli.channel,
        &time_granularity,
        &entity_granularity,
        columns,
    )?
    .with_tracker(tracker.clone());

    let credentials = config.credentials_for(fetcher.channel())?;

    info!(
        channel = %fetcher.channel(),
        start = %cli.start,
        end = %cli.end,
        "Starting fetch"
    );
    let report = fetcher.run(&credentials, day_start(cli.start), day_start(cli.end))?;

    match cli.format {
        OutputFormat::Csv => print!("{}", report.to_csv()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(record) = tracker.record(fetcher.channel()) {
        debug!(
            fetches = record.fetches,
            rows = record.rows,
            "Fetch accounting"
        );
    }

    Ok(())
}
