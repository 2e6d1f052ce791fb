//! Member groups and the per-page index
//!
//! Groups mirror the `.members` blocks of a generated page. A group whose
//! records are all hidden is collapsed as a whole (empty-group collapsing).

use serde::{Deserialize, Serialize};

use super::record::MemberRecord;

/// A titled block of member records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberGroup {
    /// Heading text, e.g. "Value Members"
    pub title: String,

    /// Group sits under an "inherited from" ancestor heading; its records are
    /// displayed as inherited entries
    pub inherited: bool,

    pub records: Vec<MemberRecord>,

    /// Render state: hidden when every record is hidden
    pub visible: bool,
}

impl MemberGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            inherited: false,
            records: Vec::new(),
            visible: true,
        }
    }

    /// Number of currently visible records
    pub fn visible_count(&self) -> usize {
        self.records.iter().filter(|r| r.visible).count()
    }
}

/// All member groups of one documentation page, plus the linearization
/// (ancestor chain, the documented entity itself first) used by ownership
/// filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberIndex {
    pub groups: Vec<MemberGroup>,
    pub linearization: Vec<String>,
}

impl MemberIndex {
    /// Iterate over every record of every group
    pub fn records(&self) -> impl Iterator<Item = &MemberRecord> {
        self.groups.iter().flat_map(|g| g.records.iter())
    }

    /// Total number of currently visible records across all groups
    pub fn visible_count(&self) -> usize {
        self.groups.iter().map(|g| g.visible_count()).sum()
    }

    /// Ancestors other than the documented entity itself
    pub fn ancestors(&self) -> &[String] {
        if self.linearization.is_empty() {
            &[]
        } else {
            &self.linearization[1..]
        }
    }
}
