//! Restart reporting engine for Kubernetes pods
//!
//! This crate turns a snapshot of pod statuses into a restart report:
//! - Aggregating restart counts per pod or per container
//! - Filtering pods by a minimum restart threshold
//! - Sorting by restarts, age or start time
//! - Rendering an aligned table or JSON

pub mod builder;
pub mod error;
pub mod humanize;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod render;
pub mod sort;
pub mod threshold;

pub use builder::{build_pod_records, build_records, BuildOptions};
pub use error::ReportError;
pub use humanize::{humanize_age, humanize_since};
pub use models::*;
pub use observability::ReportLogger;
pub use pipeline::{collect_records, ReportOptions};
pub use render::{render_json, render_table, Rendered, NO_RESTARTS};
pub use sort::{sort_records, SortKey};
pub use threshold::Threshold;
