//! Merge a directory of CSV exports into one deduplicated dataset.
//!
//! The pipeline is three sequential steps: load every `*.csv` file in a
//! directory into one table (all files must share an identical header),
//! drop duplicate rows within groups defined by key columns, and write
//! the result back out as CSV. Built for robotics-competition scouting
//! exports, but nothing in it is specific to that schema.

pub mod config;
pub mod dedup;
pub mod error;
pub mod loader;
pub mod table;
pub mod writer;

pub use config::{parse_column_list, MergeConfig, DEFAULT_DEDUP_KEYS, DEFAULT_GROUP_KEYS};
pub use error::MergeError;
pub use table::{RecordTable, Row};

/// Runs the full merge pipeline for one configuration.
///
/// A directory with zero CSV files produces an empty output file: there
/// is no schema to group against, so the dedup step is skipped.
pub fn run(config: &MergeConfig) -> Result<(), MergeError> {
    let combined = loader::read_csv_directory(&config.directory)?;

    if !combined.has_columns() {
        tracing::warn!(
            directory = %config.directory.display(),
            "no CSV files found; writing empty output"
        );
        return writer::write_table(&combined, &config.output);
    }

    let deduplicated = dedup::group_and_dedup(&combined, &config.group_keys, &config.dedup_keys)?;
    writer::write_table(&deduplicated, &config.output)
}
