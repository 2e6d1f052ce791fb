//! Ordering of member lists.
//!
//! Two comparators: alphabetical (name ascending) and chronological (date
//! descending, newest first). Ties fall back to original document order, so
//! sorting is stable and `reorder` is idempotent.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::MemberRecord;

/// How member lists are sorted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    #[value(alias = "alpha")]
    Alphabetical,
    #[value(alias = "date")]
    Chronological,
}

/// Compare two records under a sort mode.
///
/// Chronological puts newer dates first; records without a date sort last.
pub fn compare(a: &MemberRecord, b: &MemberRecord, mode: SortMode) -> Ordering {
    let primary = match mode {
        SortMode::Alphabetical => a.name.cmp(&b.name),
        SortMode::Chronological => match (a.date, b.date) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary.then_with(|| a.doc_order.cmp(&b.doc_order))
}

/// Re-sort the visible entries of a member list in place.
///
/// Hidden entries keep their positions; only the visible slots are
/// rewritten, each taking its successor in sorted order. Idempotent:
/// reordering an already-sorted list changes nothing.
pub fn reorder(records: &mut [MemberRecord], mode: SortMode) {
    let slots: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.visible)
        .map(|(i, _)| i)
        .collect();

    let mut visible: Vec<MemberRecord> = slots.iter().map(|&i| records[i].clone()).collect();
    visible.sort_by(|a, b| compare(a, b, mode));

    for (slot, record) in slots.into_iter().zip(visible) {
        records[slot] = record;
    }
}
