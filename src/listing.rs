//! Listing builder for the menu screens.
//!
//! Formats one numbered line per application, in sheet order.

use crate::model::{Record, Table};

/// How the outcome is shown at the end of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutcomeMarker {
    /// `[Waiting]`, used when picking a row to edit.
    Bracketed,
    /// `Waiting`, used by the read-only view.
    Plain,
}

/// Pre-formatted lines for a listing.
pub(crate) struct Listing {
    pub lines: Vec<String>,
}

fn describe(index: usize, record: &Record, marker: OutcomeMarker) -> String {
    let outcome = match marker {
        OutcomeMarker::Bracketed => format!("[{}]", record.outcome),
        OutcomeMarker::Plain => record.outcome.clone(),
    };
    format!(
        "[{index}] {} - {} ({}) - {outcome}",
        record.company, record.position, record.city
    )
}

/// Build a 1-indexed listing of every application.
pub(crate) fn build_listing(table: &Table, marker: OutcomeMarker) -> Listing {
    let lines = table
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| describe(i + 1, record, marker))
        .collect();
    Listing { lines }
}
