//! The restart report command

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use restart_lib::{collect_records, PodStatusSnapshot, ReportLogger, ReportOptions};

use crate::client::PodClient;
use crate::config::Settings;
use crate::output::{format_records, print_warning, OutputFormat};
use crate::Cli;

/// Shown when the pod listing fails or returns nothing
pub const FETCH_FAILED_HINT: &str =
    "Failed to get pods data: check your parameters, set a context or verify API server.";

/// Fully resolved parameters for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub request_timeout: Duration,
    pub format: OutputFormat,
    pub options: ReportOptions,
}

impl Invocation {
    /// Merge flags over settings and validate the report options.
    /// Runs before any cluster call so bad input never reaches the API.
    pub fn resolve(cli: &Cli, settings: Settings) -> Result<Self> {
        let threshold = cli.threshold.unwrap_or(settings.threshold);
        let sort_by = cli.sort_by.clone().unwrap_or(settings.sort_by);
        let options = ReportOptions::from_raw(cli.containers || settings.containers, threshold, &sort_by)?;

        let format = match (cli.format, settings.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(value)) => OutputFormat::parse_setting(value)?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            namespace: cli.namespace.clone().or(settings.namespace),
            context: cli.context.clone().or(settings.context),
            kubeconfig: cli.kubeconfig.clone(),
            request_timeout: Duration::from_secs(
                cli.request_timeout.unwrap_or(settings.request_timeout_secs),
            ),
            format,
            options,
        })
    }
}

/// What a run prints once the fetch has settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Report text for stdout
    Report(String),
    /// Diagnostic hint for stderr; nothing to report
    Hint(&'static str),
}

/// Fetch the pod snapshot and print the restart report
pub async fn show_restarts(client: &PodClient, invocation: &Invocation) -> Result<()> {
    let logger = ReportLogger::new(invocation.namespace.as_deref());
    logger.log_options(&invocation.options);

    let started = Instant::now();
    let fetched = client.fetch_snapshot(invocation.namespace.as_deref()).await;
    if let Ok(pods) = &fetched {
        logger.log_snapshot_fetched(pods.len(), started.elapsed().as_millis() as u64);
    }

    match outcome(fetched, invocation, &logger)? {
        Outcome::Report(text) => println!("{}", text),
        Outcome::Hint(hint) => print_warning(hint),
    }
    Ok(())
}

/// Decide the output for a fetch result. A failed or empty listing is
/// not an error: it yields the hint.
fn outcome(
    fetched: Result<Vec<PodStatusSnapshot>>,
    invocation: &Invocation,
    logger: &ReportLogger,
) -> Result<Outcome> {
    let pods = match fetched {
        Ok(pods) if !pods.is_empty() => pods,
        Ok(_) => {
            logger.log_fetch_failed("no pods returned");
            return Ok(Outcome::Hint(FETCH_FAILED_HINT));
        }
        Err(e) => {
            logger.log_fetch_failed(&format!("{:#}", e));
            return Ok(Outcome::Hint(FETCH_FAILED_HINT));
        }
    };

    build_output(&pods, invocation, logger).map(Outcome::Report)
}

/// Report text for a fetched snapshot. Ages are measured from now, not
/// from the fetch.
fn build_output(
    pods: &[PodStatusSnapshot],
    invocation: &Invocation,
    logger: &ReportLogger,
) -> Result<String> {
    let records = collect_records(pods, &invocation.options, Utc::now());
    logger.log_report(&records);
    format_records(&records, invocation.format)
}
