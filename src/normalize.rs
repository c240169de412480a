//! Row ordering for the application sheet.
//!
//! Data rows are kept sorted by company name, compared case-insensitively, with an
//! empty company sorting first. Whole records are moved, so the five fields of a
//! row always stay together.

use crate::model::{Record, Table};

/// Sort key for a row: the lowercased company, empty when missing.
fn company_key(record: &Record) -> String {
    record.company.to_lowercase()
}

/// Re-sort the data rows of `table` by company.
///
/// The sort is stable, so rows sharing a company keep their relative order and a
/// second pass over an already sorted table changes nothing.
pub fn sort_by_company(table: &mut Table) {
    let mut rows = std::mem::take(&mut table.records);
    let before: Vec<String> = rows.iter().map(company_key).collect();

    rows.sort_by_cached_key(company_key);

    let moved = rows
        .iter()
        .zip(&before)
        .any(|(row, key)| company_key(row) != *key);
    tracing::debug!(rows = rows.len(), moved, "sorted rows by company");

    // Full overwrite by value: the table is rebuilt from the sorted rows.
    table.records = rows;
}
