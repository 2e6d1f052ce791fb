//! Filter state and its reducers.
//!
//! The state is an explicit immutable value: UI events map to FilterActions
//! and `apply` returns the next state. The pipeline reads the state on every
//! re-evaluation; nothing persists across page loads.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::Kind;
use crate::order::SortMode;

/// All filter flags read by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterState {
    /// Raw free-text query; compiled by the pipeline per pass
    pub query: String,

    /// Kind-inclusion set; a record's kind must be in it. Default: all kinds.
    pub kinds: HashSet<Kind>,

    /// Show protected members too (default: public only)
    pub show_all_visibility: bool,

    /// Owners whose flat members are hidden (toggled-out ancestors)
    pub excluded_owners: HashSet<String>,

    pub show_concrete: bool,
    pub show_abstract: bool,

    pub sort: SortMode,

    /// Group inherited members under their declaring ancestor instead of
    /// flat alongside owned members. While active, every ancestor's flat
    /// entries are excluded regardless of the toggled-out set.
    pub inheritance_mode: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            kinds: Kind::ALL.into_iter().collect(),
            show_all_visibility: false,
            excluded_owners: HashSet::new(),
            show_concrete: true,
            show_abstract: true,
            sort: SortMode::Alphabetical,
            inheritance_mode: false,
        }
    }
}

/// A UI event translated into a state transition
#[derive(Debug, Clone)]
pub enum FilterAction {
    SetQuery(String),
    /// Escape key / clear button
    ClearQuery,
    /// Flip one kind in or out of the inclusion set
    ToggleKind(Kind),
    ShowAllVisibility,
    PublicOnly,
    ExcludeOwner(String),
    IncludeOwner(String),
    /// The "hide all" ancestors control
    ExcludeOwners(Vec<String>),
    /// The "show all" ancestors control
    IncludeAllOwners,
    ToggleConcrete,
    ToggleAbstract,
    SetSort(SortMode),
    SetInheritanceMode(bool),
}

impl FilterState {
    /// Pure reducer: consume the current state, return the next one.
    pub fn apply(mut self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetQuery(query) => self.query = query,
            FilterAction::ClearQuery => self.query.clear(),
            FilterAction::ToggleKind(kind) => {
                if !self.kinds.remove(&kind) {
                    self.kinds.insert(kind);
                }
            }
            FilterAction::ShowAllVisibility => self.show_all_visibility = true,
            FilterAction::PublicOnly => self.show_all_visibility = false,
            FilterAction::ExcludeOwner(owner) => {
                self.excluded_owners.insert(owner);
            }
            FilterAction::IncludeOwner(owner) => {
                self.excluded_owners.remove(&owner);
            }
            FilterAction::ExcludeOwners(owners) => self.excluded_owners.extend(owners),
            FilterAction::IncludeAllOwners => self.excluded_owners.clear(),
            FilterAction::ToggleConcrete => self.show_concrete = !self.show_concrete,
            FilterAction::ToggleAbstract => self.show_abstract = !self.show_abstract,
            FilterAction::SetSort(sort) => self.sort = sort,
            FilterAction::SetInheritanceMode(on) => self.inheritance_mode = on,
        }
        self
    }

    /// Owners whose flat entries are hidden, given the page's linearization
    /// (self first). In inheritance mode that is every ancestor; otherwise
    /// the toggled-out set.
    pub fn effective_excluded_owners(&self, linearization: &[String]) -> HashSet<String> {
        if self.inheritance_mode {
            linearization.iter().skip(1).cloned().collect()
        } else {
            self.excluded_owners.clone()
        }
    }
}
