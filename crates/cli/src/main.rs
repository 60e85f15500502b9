//! Pod restarts kubectl plugin
//!
//! Lists the pods (or containers) in a cluster that have restarted, with
//! their restart counts, age and start time.

mod client;
mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{builder::PossibleValuesParser, Parser};
use restart_lib::SortKey;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::restarts::{self, Invocation};
use output::{LogFormat, OutputFormat};

const LONG_ABOUT: &str = "\
This command prints a table with all the restarting pods inside your cluster.
The lookup can be restricted to a specific namespace, based on a minimum
threshold for restarts, or broken down into container restarts.

The purpose of this is to have a glance at what has been failing and since
when, as age and start times are included in the result table.";

const EXAMPLES: &str = "\
Examples:
  Cluster-wide listing
  $ kubectl pod-restarts

  Restricts listing to a namespace (faster in big clusters)
  $ kubectl pod-restarts -n production

  Ignores pods below a specific threshold (10 restarts)
  $ kubectl pod-restarts -t 10

  Also lists all the containers restarting inside the pods
  $ kubectl pod-restarts -c";

/// Sorted table of all pods with restarts and their age, start time.
#[derive(Parser, Debug)]
#[command(name = "kubectl-pod_restarts", bin_name = "kubectl pod-restarts")]
#[command(author, version, about, long_about = LONG_ABOUT, after_help = EXAMPLES)]
pub struct Cli {
    /// Only inspect this namespace (whole cluster if omitted)
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// Also lists containers restarts, ignoring thresholds
    #[arg(long, short)]
    pub containers: bool,

    /// Only list restarts above the given threshold
    #[arg(long, short, value_parser = clap::value_parser!(i32).range(0..))]
    pub threshold: Option<i32>,

    /// Sort the table by restarts, age (newest first) or start (oldest first)
    #[arg(long, value_name = "KEY", value_parser = PossibleValuesParser::new(SortKey::VARIANTS))]
    pub sort_by: Option<String>,

    /// Output format
    #[arg(long, short = 'o')]
    pub format: Option<OutputFormat>,

    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Path to kubeconfig file (uses default if not specified)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Timeout in seconds for the pod listing
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Log format for diagnostics on stderr
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

/// Initialize tracing on stderr, keeping stdout for the report
fn init_logging(verbose: bool, format: LogFormat) {
    let default_filter = if verbose {
        "restart_lib=debug,kubectl_pod_restarts=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    // Validate everything before touching the cluster
    let settings = config::Settings::load()?;
    let invocation = Invocation::resolve(&cli, settings)?;
    debug!(?invocation, "Resolved invocation");

    let client = client::PodClient::new(
        invocation.kubeconfig.as_deref(),
        invocation.context.as_deref(),
        invocation.request_timeout,
    )
    .await?;

    restarts::show_restarts(&client, &invocation).await
}
