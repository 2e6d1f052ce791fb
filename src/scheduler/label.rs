//! Standard labels of the entity index.
//!
//! The index page sequences its work into four phases. Lower priority runs
//! first.

/// Per-element setup on page load
pub const LABEL_INIT: &str = "init";
/// Narrowing the index to one package subtree
pub const LABEL_FOCUS: &str = "focus";
/// Packages-only vs all-entities display
pub const LABEL_KIND: &str = "kind";
/// Free-text filtering of the index
pub const LABEL_FILTER: &str = "filter";

pub const PRIORITY_INIT: i32 = 1;
pub const PRIORITY_FOCUS: i32 = 2;
pub const PRIORITY_KIND: i32 = 3;
pub const PRIORITY_FILTER: i32 = 4;
