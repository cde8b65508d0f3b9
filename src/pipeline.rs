//! Linear pipeline orchestration with per-stage outcome tracking.
//!
//! Stages run strictly in order: scrape → export → notify. No stage
//! swallows its own failures; each returns a typed error, and this module
//! is the single place those errors are caught, logged, and recorded as
//! [`StageOutcome`]s. The configured [`FailurePolicy`] decides whether a
//! failed stage aborts the run or the pipeline continues with what it has.

use tracing::{error, warn};

use crate::config::{Config, FailurePolicy};
use crate::export::CsvExporter;
use crate::notify::Notifier;
use crate::record::MovieRecord;
use crate::scrape::ChartScraper;

/// Pipeline stage identifiers, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetch and decode the chart page.
    Scrape,
    /// Write the CSV export.
    Export,
    /// Compose and send the digest email.
    Notify,
}

impl Stage {
    /// Short stage name for logs and the final summary.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scrape => "scrape",
            Self::Export => "export",
            Self::Notify => "notify",
        }
    }
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage completed.
    Succeeded,
    /// The stage ran and failed.
    Failed,
    /// The stage did not run (aborted run or explicit skip).
    Skipped,
}

/// One entry in the pipeline report.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// Which stage this outcome belongs to.
    pub stage: Stage,
    /// How the stage ended.
    pub status: StageStatus,
    /// Rendered error (failed) or skip reason (skipped).
    pub detail: Option<String>,
}

impl StageOutcome {
    fn succeeded(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Succeeded,
            detail: None,
        }
    }

    fn failed(stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    fn skipped(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            detail: Some(reason.into()),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Records the scrape stage yielded (empty when it failed).
    pub records: Vec<MovieRecord>,
    /// One outcome per stage, in run order.
    pub outcomes: Vec<StageOutcome>,
}

impl PipelineReport {
    /// True when any stage ran and failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| outcome.status == StageStatus::Failed)
    }

    /// Names of failed stages, in run order.
    #[must_use]
    pub fn failed_stages(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == StageStatus::Failed)
            .map(|outcome| outcome.stage.name())
            .collect()
    }

    /// Number of outcomes with the given status.
    #[must_use]
    pub fn count(&self, status: StageStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }
}

/// Runs the three-stage pipeline with the supplied configuration.
///
/// Never returns an error: every stage failure is captured in the report,
/// and the caller decides what a failed run means (the binary exits
/// non-zero when [`PipelineReport::has_failures`] is true).
pub async fn run(config: &Config) -> PipelineReport {
    let mut report = PipelineReport::default();

    // Scrape
    let scraper = ChartScraper::with_timeouts(
        &config.scrape.url,
        config.scrape.count,
        config.scrape.connect_timeout_secs,
        config.scrape.read_timeout_secs,
    );
    match scraper.fetch().await {
        Ok(records) => {
            report.records = records;
            report.outcomes.push(StageOutcome::succeeded(Stage::Scrape));
        }
        Err(e) => {
            error!(error = %e, "scrape stage failed");
            report
                .outcomes
                .push(StageOutcome::failed(Stage::Scrape, e.to_string()));
            if config.policy == FailurePolicy::FailFast {
                abort_remaining(&mut report, &[Stage::Export, Stage::Notify]);
                return report;
            }
        }
    }

    // Export. Under BestEffort this runs even after a failed scrape and
    // writes a header-only file, so the emailed attachment matches what was
    // scraped this run rather than a stale previous export.
    let exporter = CsvExporter::new(&config.output);
    match exporter.write(&report.records) {
        Ok(_) => report.outcomes.push(StageOutcome::succeeded(Stage::Export)),
        Err(e) => {
            error!(error = %e, "export stage failed");
            report
                .outcomes
                .push(StageOutcome::failed(Stage::Export, e.to_string()));
            if config.policy == FailurePolicy::FailFast {
                abort_remaining(&mut report, &[Stage::Notify]);
                return report;
            }
        }
    }

    // Notify
    if config.skip_empty && report.records.is_empty() {
        warn!("no records scraped; skipping email per configuration");
        report
            .outcomes
            .push(StageOutcome::skipped(Stage::Notify, "no records scraped"));
        return report;
    }

    let notifier = Notifier::new(config.mail.clone());
    match notifier.send(&report.records, &config.output).await {
        Ok(()) => report.outcomes.push(StageOutcome::succeeded(Stage::Notify)),
        Err(e) => {
            error!(error = %e, "notify stage failed");
            report
                .outcomes
                .push(StageOutcome::failed(Stage::Notify, e.to_string()));
        }
    }

    report
}

fn abort_remaining(report: &mut PipelineReport, stages: &[Stage]) {
    for stage in stages {
        warn!(stage = stage.name(), "stage skipped after earlier failure");
        report
            .outcomes
            .push(StageOutcome::skipped(*stage, "aborted after earlier failure"));
    }
}
