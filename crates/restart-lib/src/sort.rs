//! Ordering of restart records

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ReportError;
use crate::models::RestartRecord;

/// Column a report can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Fewest restarts first
    Restarts,
    /// Most recently started first
    Age,
    /// Earliest started first
    Start,
}

impl SortKey {
    pub const VARIANTS: [&'static str; 3] = ["restarts", "age", "start"];

    /// Parse a user-supplied key where the empty string means "no sorting"
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ReportError> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Restarts => "restarts",
            SortKey::Age => "age",
            SortKey::Start => "start",
        }
    }

    /// Compare two records under this key
    pub fn compare(&self, a: &RestartRecord, b: &RestartRecord) -> Ordering {
        match self {
            SortKey::Restarts => a.restarts.cmp(&b.restarts),
            SortKey::Start => a.reference_time.cmp(&b.reference_time),
            // Youngest first: newest restarts float to the top
            SortKey::Age => b.reference_time.cmp(&a.reference_time),
        }
    }
}

impl FromStr for SortKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restarts" => Ok(SortKey::Restarts),
            "age" => Ok(SortKey::Age),
            "start" => Ok(SortKey::Start),
            other => Err(ReportError::InvalidSortKey {
                given: other.to_string(),
            }),
        }
    }
}

/// Stable sort of `records` by `key`.
///
/// Without a key the records keep fetch order, which depends on the API
/// server and is not guaranteed to be the same across calls.
pub fn sort_records(records: &mut [RestartRecord], key: Option<SortKey>) {
    if let Some(key) = key {
        records.sort_by(|a, b| key.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn record(name: &str, restarts: i32, reference_time: DateTime<Utc>) -> RestartRecord {
        RestartRecord {
            namespace: "default".to_string(),
            name: name.to_string(),
            restarts,
            reference_time,
            age: String::new(),
        }
    }

    fn names(records: &[RestartRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_parse_known_keys() {
        assert_eq!("restarts".parse::<SortKey>().unwrap(), SortKey::Restarts);
        assert_eq!("age".parse::<SortKey>().unwrap(), SortKey::Age);
        assert_eq!("start".parse::<SortKey>().unwrap(), SortKey::Start);
        assert_eq!(SortKey::parse_optional("").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_key_with_valid_options() {
        let err = SortKey::parse_optional("namespace").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("namespace"));
        for variant in SortKey::VARIANTS {
            assert!(message.contains(variant), "missing {variant} in {message}");
        }
        // Case matters
        assert!("Restarts".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_restarts_sort_is_stable() {
        let now = Utc::now();
        let mut records = vec![
            record("c", 5, now),
            record("a", 2, now),
            record("b", 5, now),
            record("d", 2, now),
        ];

        sort_records(&mut records, Some(SortKey::Restarts));
        assert_eq!(names(&records), vec!["a", "d", "c", "b"]);

        let once = records.clone();
        sort_records(&mut records, Some(SortKey::Restarts));
        assert_eq!(records, once);
    }

    #[test]
    fn test_age_is_reverse_of_start() {
        let now = Utc::now();
        let input = vec![
            record("middle", 1, now - Duration::hours(2)),
            record("oldest", 1, now - Duration::days(3)),
            record("newest", 1, now - Duration::seconds(10)),
        ];

        let mut by_start = input.clone();
        sort_records(&mut by_start, Some(SortKey::Start));
        assert_eq!(names(&by_start), vec!["oldest", "middle", "newest"]);

        let mut by_age = input;
        sort_records(&mut by_age, Some(SortKey::Age));
        let mut reversed = by_start.clone();
        reversed.reverse();
        assert_eq!(by_age, reversed);
    }

    #[test]
    fn test_equal_timestamps_keep_original_order() {
        let now = Utc::now();
        let mut records = vec![record("first", 1, now), record("second", 9, now)];

        sort_records(&mut records, Some(SortKey::Start));
        assert_eq!(names(&records), vec!["first", "second"]);
        sort_records(&mut records, Some(SortKey::Age));
        assert_eq!(names(&records), vec!["first", "second"]);
    }

    #[test]
    fn test_no_key_keeps_fetch_order() {
        let now = Utc::now();
        let mut records = vec![record("z", 9, now), record("a", 1, now)];
        sort_records(&mut records, None);
        assert_eq!(names(&records), vec!["z", "a"]);
    }
}
