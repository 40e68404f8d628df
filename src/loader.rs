//! Directory loader: merges every CSV file in a directory into one table.
//!
//! Uses the `csv` crate so quoted commas and newlines inside fields are
//! handled correctly. All files must share one exact header (names and
//! order); the first file visited sets the reference schema.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::MergeError;
use crate::table::RecordTable;

/// Reads every `*.csv` file in `directory` (non-recursive) into a single
/// [`RecordTable`].
///
/// Files are visited in sorted path order so the merged row order is
/// deterministic. A directory containing no CSV files yields the empty
/// table, not an error.
///
/// # Errors
///
/// - [`MergeError::DirectoryNotFound`] if `directory` is not an existing
///   directory.
/// - [`MergeError::SchemaMismatch`] if any file's header differs from
///   the first file's header; nothing of the partial merge is kept.
/// - [`MergeError::ReadFailed`] for unreadable files, a missing header
///   row, or malformed records.
pub fn read_csv_directory(directory: &Path) -> Result<RecordTable, MergeError> {
    if !directory.is_dir() {
        return Err(MergeError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let mut paths = csv_paths(directory)?;
    paths.sort();

    let mut table = RecordTable::empty();
    for path in &paths {
        append_file(&mut table, path)?;
    }

    tracing::info!(
        files = paths.len(),
        rows = table.len(),
        directory = %directory.display(),
        "merged directory"
    );
    Ok(table)
}

/// Collects the `.csv` entries of `directory` (extension matched
/// case-insensitively, subdirectories ignored).
fn csv_paths(directory: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let io_err = |source: std::io::Error| MergeError::ReadFailed {
        file: directory.display().to_string(),
        source: source.into(),
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_file() && is_csv_file(&path) {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// True if the path has a `.csv` extension (case-insensitive).
fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Appends one file's rows to `table`, enforcing the reference schema.
fn append_file(table: &mut RecordTable, path: &Path) -> Result<(), MergeError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let read_err = |source: csv::Error| MergeError::ReadFailed {
        file: file_name.clone(),
        source,
    };

    let file = File::open(path).map_err(|e| read_err(e.into()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().map_err(read_err)?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(read_err(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "CSV file has no header row",
        ))));
    }

    if !table.has_columns() {
        // First file encountered sets the reference schema.
        *table = RecordTable::new(headers);
    } else if &headers != table.headers() {
        return Err(MergeError::SchemaMismatch {
            file: file_name.clone(),
        });
    }

    let mut rows = 0usize;
    for result in reader.records() {
        let record = result.map_err(read_err)?;
        table.push(record);
        rows += 1;
    }

    tracing::debug!(file = %file_name, rows, "loaded file");
    Ok(())
}
