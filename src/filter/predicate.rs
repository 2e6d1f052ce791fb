//! The filter predicates.
//!
//! One boolean test per filter dimension. A record is shown iff every active
//! predicate passes; predicates are ANDed, never OR'd.

use std::collections::HashSet;

use crate::domain::MemberRecord;

use super::query::TextQuery;
use super::state::FilterState;

/// Ownership/ancestor exclusion. Inherited entries are exempt: owner
/// filtering must not happen in "inherited from" member lists.
pub fn by_ownership(record: &MemberRecord, excluded_owners: &HashSet<String>) -> bool {
    record.inherited || !excluded_owners.contains(&record.owner)
}

/// Protected members are hidden unless "show all" is active.
pub fn by_visibility(record: &MemberRecord, state: &FilterState) -> bool {
    state.show_all_visibility || record.visibility == crate::domain::Visibility::Public
}

/// Free-text match against the record's name concatenated with its
/// documentation text.
pub fn by_text(record: &MemberRecord, query: &TextQuery) -> bool {
    query.matches(&record.filter_text())
}

/// The record's kind must be in the active kind set.
pub fn by_kind(record: &MemberRecord, state: &FilterState) -> bool {
    state.kinds.contains(&record.kind)
}

/// Abstract/concrete inclusion.
pub fn by_impl(record: &MemberRecord, state: &FilterState) -> bool {
    if record.is_abstract {
        state.show_abstract
    } else {
        state.show_concrete
    }
}

/// Evaluate all predicates for one record, in pipeline order.
///
/// `linearization` is the page's ancestor chain (self first), needed to
/// resolve the effective owner exclusion in inheritance mode. Callers
/// re-evaluating many records should prefer `apply_filter`, which compiles
/// the query once.
pub fn evaluate_visibility(
    record: &MemberRecord,
    state: &FilterState,
    linearization: &[String],
) -> bool {
    let query = TextQuery::compile(&state.query);
    let excluded = state.effective_excluded_owners(linearization);
    evaluate_compiled(record, state, &query, &excluded)
}

pub(super) fn evaluate_compiled(
    record: &MemberRecord,
    state: &FilterState,
    query: &TextQuery,
    excluded_owners: &HashSet<String>,
) -> bool {
    by_ownership(record, excluded_owners)
        && by_visibility(record, state)
        && by_text(record, query)
        && by_kind(record, state)
        && by_impl(record, state)
}
