//! Table rendering for restart reports

use std::fmt;

use tabled::{
    settings::{object::Columns, Modify, Padding, Style},
    Table, Tabled,
};

use crate::models::RestartRecord;

/// Informational line shown when nothing restarted
pub const NO_RESTARTS: &str = "No restarts.";

/// Spaces between adjacent columns
const COLUMN_GAP: usize = 4;

const START_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Row for the restarts table
#[derive(Tabled)]
struct RestartRow {
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "RESTARTS")]
    restarts: i32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "AGE")]
    age: String,
    #[tabled(rename = "START")]
    start: String,
}

impl From<&RestartRecord> for RestartRow {
    fn from(record: &RestartRecord) -> Self {
        Self {
            namespace: record.namespace.clone(),
            restarts: record.restarts,
            name: record.name.clone(),
            age: record.age.clone(),
            start: record.reference_time.format(START_FORMAT).to_string(),
        }
    }
}

/// Outcome of rendering a finished record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Table(String),
    NoRestarts,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Table(table) => f.write_str(table),
            Rendered::NoRestarts => f.write_str(NO_RESTARTS),
        }
    }
}

/// Render already filtered and ordered records as a borderless table
pub fn render_table(records: &[RestartRecord]) -> Rendered {
    if records.is_empty() {
        return Rendered::NoRestarts;
    }

    let rows: Vec<RestartRow> = records.iter().map(RestartRow::from).collect();
    let table = Table::new(rows)
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_GAP, 0, 0))
        .with(Modify::new(Columns::last()).with(Padding::zero()))
        .to_string();

    // Cells are padded to column width; drop the tail of short last cells
    let lines: Vec<&str> = table.lines().map(str::trim_end).collect();
    Rendered::Table(lines.join("\n"))
}

/// Render records as a pretty JSON array
pub fn render_json(records: &[RestartRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
