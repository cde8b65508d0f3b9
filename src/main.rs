//! CLI entry point for the moviedigest tool.

use anyhow::{Result, bail};
use clap::Parser;
use moviedigest_core::config::{self, Config, FailurePolicy, MailConfig, ScrapeConfig};
use moviedigest_core::pipeline;
use moviedigest_core::scrape::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use moviedigest_core::StageStatus;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let Some(recipient) = args.to.clone() else {
        info!("No recipient configured. Pass --to to scrape, export, and email the digest.");
        info!("Example: moviedigest --to you@example.com");
        return Ok(());
    };

    let (username, password) = config::smtp_credentials_from_env()?;
    let sender = args.from.clone().unwrap_or_else(|| username.clone());
    let subject = args
        .subject
        .clone()
        .unwrap_or_else(|| format!("Top {} IMDb Movies", args.count));

    let config = Config {
        scrape: ScrapeConfig {
            url: args.url.clone(),
            count: usize::from(args.count),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        },
        output: args.output.clone(),
        mail: MailConfig {
            sender,
            recipient,
            subject,
            smtp_host: args.smtp_host.clone(),
            smtp_port: args.smtp_port,
            username,
            password,
        },
        policy: if args.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::BestEffort
        },
        skip_empty: args.skip_empty,
    };
    config.validate()?;

    info!(url = %config.scrape.url, count = config.scrape.count, "Moviedigest starting");

    let report = pipeline::run(&config).await;

    info!(
        records = report.records.len(),
        succeeded = report.count(StageStatus::Succeeded),
        failed = report.count(StageStatus::Failed),
        skipped = report.count(StageStatus::Skipped),
        "Pipeline complete"
    );

    if report.has_failures() {
        bail!(
            "pipeline completed with failed stages: {}",
            report.failed_stages().join(", ")
        );
    }

    Ok(())
}
