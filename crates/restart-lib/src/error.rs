//! Error types for report configuration

use thiserror::Error;

/// Rejected report parameters. Raised before any records are built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("invalid sort key '{given}': expected one of \"restarts\", \"age\" or \"start\"")]
    InvalidSortKey { given: String },

    #[error("invalid threshold {0}: must be zero or a positive number of restarts")]
    NegativeThreshold(i32),
}
