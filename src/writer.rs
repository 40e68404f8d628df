//! CSV output with atomic replacement.
//!
//! The table is written to a temporary file in the destination directory
//! and persisted over the final path once complete, so a failed run
//! never leaves a truncated output file. Missing parent directories are
//! created first; an existing file at the path is overwritten silently.

use std::io::BufWriter;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::MergeError;
use crate::table::RecordTable;

/// Serializes `table` as CSV (header row + data rows, no index column)
/// to `path`.
///
/// The empty table (zero columns) produces an empty file.
///
/// # Errors
///
/// [`MergeError::WriteFailed`] if the parent directories cannot be
/// created or the file cannot be written or persisted.
pub fn write_table(table: &RecordTable, path: &Path) -> Result<(), MergeError> {
    let write_err = |source: std::io::Error| MergeError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source: csv::Error| {
        write_err(std::io::Error::new(std::io::ErrorKind::Other, source))
    };

    // An output like "out.csv" has an empty parent; treat it as the
    // current directory.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    // Same directory as the destination so the final rename stays on one
    // filesystem.
    let temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(temp));

    if table.has_columns() {
        writer.write_record(table.headers()).map_err(csv_err)?;
        for row in table.rows() {
            writer.write_record(row).map_err(csv_err)?;
        }
    }

    let buf_writer = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    let temp = buf_writer
        .into_inner()
        .map_err(|e| write_err(e.into_error()))?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::info!(rows = table.len(), path = %path.display(), "wrote output");
    Ok(())
}
