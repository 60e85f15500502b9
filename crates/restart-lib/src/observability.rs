//! Structured logging for report runs
//!
//! Events go through `tracing`; the binary decides where they end up.

use tracing::{debug, info, warn};

use crate::models::RestartRecord;
use crate::pipeline::{total_restarts, ReportOptions};

/// Structured logger for one invocation
///
/// Tags every event with the cluster scope the report covers.
#[derive(Clone)]
pub struct ReportLogger {
    scope: String,
}

impl ReportLogger {
    /// `namespace` of `None` means the whole cluster
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            scope: namespace.unwrap_or("all-namespaces").to_string(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Log the report parameters in effect
    pub fn log_options(&self, options: &ReportOptions) {
        debug!(
            event = "report_options",
            scope = %self.scope,
            detail_by_container = options.detail_by_container,
            threshold = options.threshold.value(),
            sort_key = ?options.sort_key.map(|k| k.as_str()),
            "Resolved report options"
        );
    }

    /// Log a successful pod listing
    pub fn log_snapshot_fetched(&self, pod_count: usize, elapsed_ms: u64) {
        debug!(
            event = "snapshot_fetched",
            scope = %self.scope,
            pod_count = pod_count,
            elapsed_ms = elapsed_ms,
            "Fetched pod snapshot"
        );
    }

    /// Log a failed or empty pod listing
    pub fn log_fetch_failed(&self, reason: &str) {
        warn!(
            event = "snapshot_fetch_failed",
            scope = %self.scope,
            reason = %reason,
            "Could not fetch pod snapshot"
        );
    }

    /// Log the outcome of a report
    pub fn log_report(&self, records: &[RestartRecord]) {
        info!(
            event = "report_produced",
            scope = %self.scope,
            records = records.len(),
            total_restarts = total_restarts(records),
            "Restart report produced"
        );
    }
}
