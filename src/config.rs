//! Run configuration assembled at startup.
//!
//! All run parameters — chart URL, record count, output path, mail settings —
//! live in an explicit [`Config`] value built by the entry point. SMTP
//! credentials are read from the environment and are never compiled into
//! source.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Environment variable holding the SMTP username.
pub const ENV_SMTP_USERNAME: &str = "MOVIEDIGEST_SMTP_USERNAME";

/// Environment variable holding the SMTP password.
pub const ENV_SMTP_PASSWORD: &str = "MOVIEDIGEST_SMTP_PASSWORD";

/// Default chart URL.
pub const DEFAULT_CHART_URL: &str = "https://www.imdb.com/chart/top/";

/// Default number of records to scrape.
pub const DEFAULT_COUNT: usize = 5;

/// Maximum number of records to scrape (the chart lists 250).
pub const MAX_COUNT: usize = 250;

/// Default CSV output path.
pub const DEFAULT_OUTPUT: &str = "top_movies.csv";

/// Default SMTP relay host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// What the pipeline does when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and run the remaining stages anyway (the default).
    /// A failed scrape still writes an empty CSV and emails an empty table.
    #[default]
    BestEffort,
    /// Abort the run at the first failed stage; later stages are recorded
    /// as skipped.
    FailFast,
}

/// Scrape stage configuration.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Chart page URL.
    pub url: String,
    /// Number of top records to keep.
    pub count: usize,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: u64,
}

/// Mail stage configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sender address for the `From` header.
    pub sender: String,
    /// The single recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP submission port.
    pub smtp_port: u16,
    /// SMTP username (from the environment).
    pub username: String,
    /// SMTP password (from the environment).
    pub password: String,
}

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scrape stage settings.
    pub scrape: ScrapeConfig,
    /// CSV output path (also the email attachment).
    pub output: PathBuf,
    /// Mail stage settings.
    pub mail: MailConfig,
    /// Stage failure policy.
    pub policy: FailurePolicy,
    /// Skip the email stage when the scrape produced zero records.
    pub skip_empty: bool,
}

impl Config {
    /// Validates config values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending value when the chart URL is not
    /// a web URL, the count is out of range, or a mail setting is unusable.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.scrape.url)
            .with_context(|| format!("invalid chart URL `{}`", self.scrape.url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "invalid chart URL `{}`: scheme `{}` is not supported, use http:// or https://",
                self.scrape.url,
                parsed.scheme()
            );
        }

        if !(1..=MAX_COUNT).contains(&self.scrape.count) {
            bail!(
                "invalid value for `count`: {}. Expected range: 1..={MAX_COUNT}",
                self.scrape.count
            );
        }

        if self.mail.smtp_port == 0 {
            bail!("invalid value for `smtp_port`: 0");
        }
        if self.mail.recipient.trim().is_empty() {
            bail!("recipient address must not be empty");
        }
        if self.mail.sender.trim().is_empty() {
            bail!("sender address must not be empty");
        }

        Ok(())
    }
}

/// Reads SMTP credentials from the environment.
///
/// # Errors
///
/// Returns an error naming the missing or empty variable.
pub fn smtp_credentials_from_env() -> Result<(String, String)> {
    let username = env::var(ENV_SMTP_USERNAME)
        .with_context(|| format!("{ENV_SMTP_USERNAME} is not set"))?;
    let password = env::var(ENV_SMTP_PASSWORD)
        .with_context(|| format!("{ENV_SMTP_PASSWORD} is not set"))?;
    if username.trim().is_empty() {
        bail!("{ENV_SMTP_USERNAME} is set but empty");
    }
    if password.trim().is_empty() {
        bail!("{ENV_SMTP_PASSWORD} is set but empty");
    }
    Ok((username, password))
}
