//! CLI command implementations

pub mod restarts;
