use std::cmp::Reverse;

use tradebook_model::ledger::{DateSpan, Ledger, LedgerRow};

/// Rows whose calendar date lies within `span`, both ends inclusive, in ledger order.
///
/// Time of day is ignored. A span with `start > end` selects nothing.
pub fn filter_range(ledger: &Ledger, span: DateSpan) -> Vec<&LedgerRow> {
    ledger
        .rows
        .iter()
        .filter(|row| span.contains(row.date()))
        .collect()
}

/// Display ordering: newest first, rows sharing a timestamp keep their relative order.
pub fn newest_first(mut rows: Vec<&LedgerRow>) -> Vec<&LedgerRow> {
    rows.sort_by_key(|row| Reverse(row.timestamp));
    rows
}
