//! Grouping and within-group deduplication.
//!
//! Single pass: rows are bucketed by their group-key tuple into
//! insertion-ordered partitions, each partition keeps the first row per
//! distinct dedup-key tuple, and the partitions are flattened back in
//! first-appearance order.

use std::collections::{HashMap, HashSet};

use crate::error::MergeError;
use crate::table::{RecordTable, Row};

/// Returns a new table with duplicate rows removed within each group.
///
/// Rows are partitioned by the tuple of values at `group_keys`;
/// partitions appear in first-appearance order of their key tuple.
/// Within a partition, the first row per distinct `dedup_keys` tuple
/// survives and keeps its relative position.
///
/// An empty `group_keys` puts every row in one partition (global
/// deduplication); an empty `dedup_keys` keeps every row.
///
/// # Errors
///
/// [`MergeError::MissingColumns`] if any group or dedup column is absent
/// from the table's header. The error lists every missing name, and no
/// grouping work happens before the check passes.
pub fn group_and_dedup(
    table: &RecordTable,
    group_keys: &[String],
    dedup_keys: &[String],
) -> Result<RecordTable, MergeError> {
    let (group_idx, dedup_idx) = resolve_keys(table, group_keys, dedup_keys)?;

    // Bucket rows by group tuple, keeping first-appearance order of the
    // tuples themselves.
    let mut bucket_of: HashMap<Vec<String>, usize> = HashMap::new();
    let mut buckets: Vec<Vec<&Row>> = Vec::new();
    for row in table.rows() {
        let key = key_tuple(row, &group_idx);
        let slot = *bucket_of.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(row);
    }

    let mut result = RecordTable::new(table.headers().clone());
    for bucket in &buckets {
        if dedup_idx.is_empty() {
            for &row in bucket {
                result.push(row.clone());
            }
            continue;
        }
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(bucket.len());
        for &row in bucket {
            if seen.insert(key_tuple(row, &dedup_idx)) {
                result.push(row.clone());
            }
        }
    }

    tracing::debug!(
        input_rows = table.len(),
        output_rows = result.len(),
        groups = buckets.len(),
        "deduplicated"
    );
    Ok(result)
}

/// Resolves both key lists against the header, reporting every missing
/// column in one error.
fn resolve_keys(
    table: &RecordTable,
    group_keys: &[String],
    dedup_keys: &[String],
) -> Result<(Vec<usize>, Vec<usize>), MergeError> {
    let mut missing = Vec::new();
    let group_idx = table.key_indices(group_keys).unwrap_or_else(|mut m| {
        missing.append(&mut m);
        Vec::new()
    });
    let dedup_idx = table.key_indices(dedup_keys).unwrap_or_else(|mut m| {
        missing.append(&mut m);
        Vec::new()
    });
    if missing.is_empty() {
        Ok((group_idx, dedup_idx))
    } else {
        Err(MergeError::MissingColumns(missing))
    }
}

fn key_tuple(row: &Row, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| row.get(i).unwrap_or("").to_string())
        .collect()
}
