//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use moviedigest_core::config::{
    DEFAULT_CHART_URL, DEFAULT_COUNT, DEFAULT_OUTPUT, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
    MAX_COUNT,
};

/// Scrape a top-movies chart, save it to CSV, and email the digest.
///
/// One run performs one scrape, one export, and one email to a single
/// recipient. SMTP credentials come from the MOVIEDIGEST_SMTP_USERNAME and
/// MOVIEDIGEST_SMTP_PASSWORD environment variables.
#[derive(Parser, Debug)]
#[command(name = "moviedigest")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Chart page URL to scrape
    #[arg(long, default_value = DEFAULT_CHART_URL)]
    pub url: String,

    /// Number of top records to keep (1-250)
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT as u16, value_parser = clap::value_parser!(u16).range(1..=MAX_COUNT as i64))]
    pub count: u16,

    /// Output CSV path (also the email attachment)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Recipient email address; without it the run prints guidance and exits
    #[arg(long)]
    pub to: Option<String>,

    /// Sender address (defaults to the SMTP username)
    #[arg(long)]
    pub from: Option<String>,

    /// Subject line (defaults to "Top <count> IMDb Movies")
    #[arg(long)]
    pub subject: Option<String>,

    /// SMTP relay host
    #[arg(long, default_value = DEFAULT_SMTP_HOST)]
    pub smtp_host: String,

    /// SMTP submission port
    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// Abort at the first failed stage instead of continuing
    #[arg(long)]
    pub fail_fast: bool,

    /// Skip the email when the scrape produced zero records
    #[arg(long)]
    pub skip_empty: bool,
}
