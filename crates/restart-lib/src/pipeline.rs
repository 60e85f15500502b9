//! Build, filter, sort and render in one pass over a snapshot

use chrono::{DateTime, Utc};

use crate::builder::{build_records, BuildOptions};
use crate::error::ReportError;
use crate::models::{PodStatusSnapshot, RestartRecord};
use crate::sort::{sort_records, SortKey};
use crate::threshold::Threshold;

/// Parameters for one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub detail_by_container: bool,
    pub threshold: Threshold,
    pub sort_key: Option<SortKey>,
}

impl ReportOptions {
    /// Validate raw parameters before anything is fetched or built
    pub fn from_raw(
        detail_by_container: bool,
        minimum_threshold: i32,
        sort_key: &str,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            detail_by_container,
            threshold: Threshold::new(minimum_threshold)?,
            sort_key: SortKey::parse_optional(sort_key)?,
        })
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            detail_by_container: self.detail_by_container,
            threshold: self.threshold,
        }
    }
}

/// Final, ordered records for a snapshot
pub fn collect_records(
    pods: &[PodStatusSnapshot],
    options: &ReportOptions,
    now: DateTime<Utc>,
) -> Vec<RestartRecord> {
    let mut records = build_records(pods, &options.build_options(), now);
    sort_records(&mut records, options.sort_key);
    records
}

/// Sum of restarts across the given records
pub fn total_restarts(records: &[RestartRecord]) -> i64 {
    records.iter().map(|r| i64::from(r.restarts)).sum()
}
