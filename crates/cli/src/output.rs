//! Output formatting utilities

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use restart_lib::{render_json, render_table, RestartRecord};

/// Output format for the restart report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table (default)
    #[default]
    Table,
    /// JSON array of records
    Json,
}

impl OutputFormat {
    /// Parse a format name coming from the config file or environment
    pub fn parse_setting(value: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(value, true)
            .map_err(|_| anyhow::anyhow!("invalid output format '{}': expected table or json", value))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Format final records for stdout
pub fn format_records(records: &[RestartRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records).to_string()),
        OutputFormat::Json => Ok(render_json(records)?),
    }
}

/// Print a warning message on stderr, keeping stdout for the report
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}
