use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type.
///
/// Every variant is fatal: the pipeline performs no retries and never
/// leaves a partially written output file behind.
#[derive(Debug, Error)]
pub enum MergeError {
    // ── Input ─────────────────────────────────────────────────────────────────
    #[error("{} does not exist in your file system or is not a directory", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("the columns of file '{file}' do not match the columns of the other files")]
    SchemaMismatch { file: String },

    #[error("failed to read '{file}': {source}")]
    ReadFailed {
        file: String,
        #[source]
        source: csv::Error,
    },

    // ── Keys / parameters ─────────────────────────────────────────────────────
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid column list '{value}': {reason}")]
    InvalidParameter { value: String, reason: String },

    // ── Output ────────────────────────────────────────────────────────────────
    #[error("failed to write output to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_every_name() {
        let err = MergeError::MissingColumns(vec!["team_number".into(), "timestamp".into()]);
        let msg = err.to_string();
        assert!(msg.contains("team_number"));
        assert!(msg.contains("timestamp"));
    }

    #[test]
    fn schema_mismatch_names_the_offending_file() {
        let err = MergeError::SchemaMismatch {
            file: "b.csv".into(),
        };
        assert!(err.to_string().contains("b.csv"));
    }
}
