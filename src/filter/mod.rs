//! The filter pipeline.
//!
//! This module decides which member records are shown:
//! - TextQuery: smart-case free-text matching (compiled once per pass)
//! - FilterState: an immutable flag set updated by pure reducers
//! - predicates: one boolean test per filter dimension, always ANDed
//! - apply_filter: full re-evaluation of every record plus empty-group
//!   collapsing
//!
//! Predicates are combined, not deltas, so toggling any flag re-evaluates
//! every currently-loaded record.

mod apply;
mod predicate;
mod query;
mod state;

pub use apply::apply_filter;
pub use predicate::{
    by_impl, by_kind, by_ownership, by_text, by_visibility, evaluate_visibility,
};
pub use query::TextQuery;
pub use state::{FilterAction, FilterState};
