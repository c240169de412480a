//! Mutation pipeline shared by every editing flow.
//!
//! Each change loads the full table, mutates it in memory, re-sorts, reformats and
//! writes the whole workbook back.

use crate::error::TrackerError;
use crate::format::{apply_formatting, SheetLayout};
use crate::model::{Outcome, Record, Table};
use crate::normalize::sort_by_company;
use crate::storage::TableStore;
use anyhow::Result;

/// Normalize, format and save `table`.
pub(crate) fn commit(store: &TableStore, table: &mut Table) -> Result<(), TrackerError> {
    sort_by_company(table);
    let mut layout = SheetLayout::default();
    apply_formatting(table, &mut layout);
    store.save(table, &layout)
}

/// Append a new application and persist the table.
pub(crate) fn add_application(store: &TableStore, record: Record) -> Result<()> {
    let mut table = store.load()?;
    tracing::info!(
        company = %record.company,
        position = %record.position,
        "adding application"
    );
    table.push(record);
    commit(store, &mut table)?;
    Ok(())
}

/// Set the outcome of the 1-based `selection` row of `table` and persist it.
///
/// Only the outcome field changes; on an out-of-range selection nothing is
/// written.
pub(crate) fn update_outcome(
    store: &TableStore,
    table: &mut Table,
    selection: usize,
    outcome: Outcome,
) -> Result<()> {
    let max = table.len();
    let record = selection
        .checked_sub(1)
        .and_then(|idx| table.records.get_mut(idx))
        .ok_or_else(|| TrackerError::InvalidSelection {
            input: selection.to_string(),
            max,
        })?;
    tracing::info!(
        company = %record.company,
        from = %record.outcome,
        to = %outcome,
        "updating outcome"
    );
    record.set_outcome(outcome);
    commit(store, table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DEFAULT_FILENAME;

    fn fresh_store(dir: &tempfile::TempDir) -> TableStore {
        let store = TableStore::new(dir.path().join(DEFAULT_FILENAME));
        store.ensure_exists().unwrap();
        store
    }

    fn add(store: &TableStore, position: &str, company: &str, url: &str) {
        let record = Record::new_application(position, company, "X", url);
        add_application(store, record).unwrap();
    }

    #[test]
    fn add_to_empty_table_yields_one_waiting_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir);

        let record = Record::new_application("Engineer", "Acme", "NYC", "http://x.com");
        add_application(&store, record).unwrap();

        let table = store.load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].company, "Acme");
        assert_eq!(table.records[0].outcome, "Waiting");
    }

    #[test]
    fn adding_sorts_by_company() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir);

        add(&store, "A", "Zeta", "http://z");
        add(&store, "B", "Acme", "http://a");

        let table = store.load().unwrap();
        let companies: Vec<&str> = table
            .records
            .iter()
            .map(|r| r.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Acme", "Zeta"]);
        assert_eq!(table.records[1].position, "A");
    }

    #[test]
    fn update_changes_only_the_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir);
        add(&store, "A", "Acme", "http://a");
        add(&store, "B", "Zeta", "http://z");

        let mut table = store.load().unwrap();
        let before = table.clone();
        update_outcome(&store, &mut table, 2, Outcome::Accepted).unwrap();

        let after = store.load().unwrap();
        assert_eq!(after.records[0], before.records[0]);
        assert_eq!(after.records[1].outcome, "Accepted");
        assert_eq!(after.records[1].company, before.records[1].company);
        assert_eq!(after.records[1].link, before.records[1].link);
    }

    #[test]
    fn out_of_range_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir);
        add(&store, "A", "Acme", "http://a");

        let mut table = store.load().unwrap();
        for selection in [0, 2, 99] {
            let err = update_outcome(&store, &mut table, selection, Outcome::Rejected)
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TrackerError>(),
                Some(TrackerError::InvalidSelection { max: 1, .. })
            ));
        }
        assert_eq!(store.load().unwrap().records[0].outcome, "Waiting");
    }
}
