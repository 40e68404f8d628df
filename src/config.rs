//! Pipeline configuration and column-list validation.

use std::path::PathBuf;

use crate::error::MergeError;

/// Group-key columns used when `--groupby` is not given. These match the
/// scouting-app export schema: one record per robot per match slot.
pub const DEFAULT_GROUP_KEYS: &[&str] = &[
    "match_number",
    "team_alliance",
    "team_position",
    "team_number",
];

/// Dedup-key columns used when `--drop_duplicates` is not given. Repeat
/// submissions of the same match slot differ only in submission time.
pub const DEFAULT_DEDUP_KEYS: &[&str] = &["timestamp"];

/// Configuration for one merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory holding the CSV files to merge.
    pub directory: PathBuf,
    /// Destination path for the merged CSV.
    pub output: PathBuf,
    /// Columns that partition rows; empty means one global partition.
    pub group_keys: Vec<String>,
    /// Columns that identify duplicates within a partition; empty
    /// disables deduplication.
    pub dedup_keys: Vec<String>,
}

impl MergeConfig {
    /// Creates a config with the default scouting-app key columns.
    pub fn new(directory: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            output: output.into(),
            group_keys: DEFAULT_GROUP_KEYS.iter().map(|s| s.to_string()).collect(),
            dedup_keys: DEFAULT_DEDUP_KEYS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the group-key columns.
    pub fn group_keys(mut self, keys: Vec<String>) -> Self {
        self.group_keys = keys;
        self
    }

    /// Replaces the dedup-key columns.
    pub fn dedup_keys(mut self, keys: Vec<String>) -> Self {
        self.dedup_keys = keys;
        self
    }
}

/// Parses a `--groupby`/`--drop_duplicates` value into column names.
///
/// The value is read as a single CSV record; each field is trimmed and
/// must be non-empty, and at least one name must remain. This is a
/// strict check, not header sniffing.
pub fn parse_column_list(value: &str) -> Result<Vec<String>, MergeError> {
    let invalid = |reason: &str| MergeError::InvalidParameter {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(value.as_bytes());

    let record = match reader.records().next() {
        Some(Ok(record)) => record,
        Some(Err(_)) | None => return Err(invalid("expected a comma-separated list of columns")),
    };

    let names: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
    if names.is_empty() || names.iter().any(String::is_empty) {
        return Err(invalid("column names must be non-empty"));
    }
    Ok(names)
}
