use std::cmp::Ordering;

use crate::movements::Movement;

/// Total order of ledger rows: date, then declared type order, then reference.
pub fn ledger_order(a: &Movement, b: &Movement) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.movement_type.ordinal().cmp(&b.movement_type.ordinal()))
        .then_with(|| a.reference_id.cmp(&b.reference_id))
}

/// Combines the movements of every source into one chronological sequence.
///
/// Nothing is filtered or deduplicated. The sort is stable, so lines of the
/// same document keep the order their source returned them in.
pub fn merge_movements<I>(sources: I) -> Vec<Movement>
where
    I: IntoIterator<Item = Vec<Movement>>,
{
    let mut merged: Vec<Movement> = sources.into_iter().flatten().collect();
    merged.sort_by(ledger_order);
    merged
}
