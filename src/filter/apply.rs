//! Full re-evaluation of a member index.

use crate::domain::MemberIndex;

use super::predicate::evaluate_compiled;
use super::query::TextQuery;
use super::state::FilterState;

/// Re-evaluate every record's visibility and collapse groups whose members
/// are all hidden. Returns the number of visible records.
///
/// Inherited-from groups are a display mode: in flat mode they are collapsed
/// wholesale (their members appear as flat entries instead, subject to the
/// ancestor toggles), and in inheritance mode they are shown while every
/// ancestor's flat entries are excluded.
///
/// Always a full pass over all currently-loaded records: predicates are
/// combined, so a change in one dimension can flip records that passed or
/// failed on another.
pub fn apply_filter(index: &mut MemberIndex, state: &FilterState) -> usize {
    let query = TextQuery::compile(&state.query);
    let excluded = state.effective_excluded_owners(&index.linearization);

    let mut visible = 0;
    for group in &mut index.groups {
        if group.inherited && !state.inheritance_mode {
            for record in &mut group.records {
                record.visible = false;
            }
            group.visible = false;
            continue;
        }
        for record in &mut group.records {
            record.visible = evaluate_compiled(record, state, &query, &excluded);
            if record.visible {
                visible += 1;
            }
        }
        group.visible = group.records.iter().any(|r| r.visible);
    }

    log::debug!(
        "filter pass: {visible} of {} record(s) visible",
        index.records().count()
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Kind, MemberGroup, MemberRecord, Visibility};
    use crate::filter::FilterAction;

    fn index() -> MemberIndex {
        let mut values = MemberGroup::new("Value Members");
        values.records.push(MemberRecord::new(
            "scala.BitSet#apply",
            Visibility::Public,
            Kind::Def,
            0,
        ));
        values.records.push(MemberRecord::new(
            "scala.BitSet#size",
            Visibility::Protected,
            Kind::Val,
            1,
        ));

        let mut types = MemberGroup::new("Type Members");
        types.records.push(MemberRecord::new(
            "scala.BitSet#Iterator",
            Visibility::Public,
            Kind::Type,
            2,
        ));

        MemberIndex {
            groups: vec![values, types],
            linearization: vec!["scala.BitSet".to_string()],
        }
    }

    #[test]
    fn test_default_state_hides_protected_only() {
        let mut index = index();
        assert_eq!(apply_filter(&mut index, &FilterState::default()), 2);
        assert!(!index.groups[0].records[1].visible);
    }

    #[test]
    fn test_empty_groups_collapse() {
        let mut index = index();
        let state = FilterState::default().apply(FilterAction::ToggleKind(Kind::Type));
        apply_filter(&mut index, &state);
        assert!(index.groups[0].visible);
        assert!(!index.groups[1].visible);
    }

    #[test]
    fn test_groups_reappear_when_predicates_relax() {
        let mut index = index();
        let narrowed = FilterState::default().apply(FilterAction::ToggleKind(Kind::Type));
        apply_filter(&mut index, &narrowed);
        assert!(!index.groups[1].visible);

        // records are never destroyed, only hidden: widening the state back
        // restores them in the same pass
        let widened = narrowed.apply(FilterAction::ToggleKind(Kind::Type));
        apply_filter(&mut index, &widened);
        assert!(index.groups[1].visible);
        assert!(index.groups[1].records[0].visible);
    }

    fn index_with_inherited() -> MemberIndex {
        let mut flat = MemberGroup::new("Value Members");
        flat.records.push(MemberRecord::new(
            "scala.BitSet#apply",
            Visibility::Public,
            Kind::Def,
            0,
        ));
        // flat copy of an ancestor's member
        flat.records.push(MemberRecord::new(
            "scala.Set#size",
            Visibility::Public,
            Kind::Val,
            1,
        ));

        let mut inherited = MemberGroup::new("Inherited from scala.Set");
        inherited.inherited = true;
        let mut contains =
            MemberRecord::new("scala.Set#contains", Visibility::Public, Kind::Def, 2);
        contains.inherited = true;
        inherited.records.push(contains);

        MemberIndex {
            groups: vec![flat, inherited],
            linearization: vec!["scala.BitSet".to_string(), "scala.Set".to_string()],
        }
    }

    #[test]
    fn test_flat_mode_collapses_inherited_groups() {
        let mut index = index_with_inherited();
        let visible = apply_filter(&mut index, &FilterState::default());

        // only the flat entries count; the ancestor group is a display mode
        assert_eq!(visible, 2);
        assert!(!index.groups[1].visible);
        assert!(!index.groups[1].records[0].visible);
    }

    #[test]
    fn test_flat_mode_owner_toggle_hides_the_flat_copies() {
        let mut index = index_with_inherited();
        let state = FilterState::default()
            .apply(FilterAction::ExcludeOwner("scala.Set".to_string()));
        let visible = apply_filter(&mut index, &state);

        // the inherited group stays collapsed, so no scala.Set member remains
        assert_eq!(visible, 1);
        assert!(index.groups[0].records[0].visible); // scala.BitSet#apply
        assert!(!index.groups[0].records[1].visible); // scala.Set#size
        assert!(!index.groups[1].visible);
    }

    #[test]
    fn test_inheritance_mode_shows_ancestor_groups_and_drops_flat_copies() {
        let mut index = index_with_inherited();
        let state = FilterState::default()
            .apply(FilterAction::ExcludeOwner("scala.Set".to_string()))
            .apply(FilterAction::SetInheritanceMode(true));
        let visible = apply_filter(&mut index, &state);

        // every ancestor's flat entries are excluded, the grouped entries
        // are shown, and the owner toggle does not reach into the group
        assert_eq!(visible, 2);
        assert!(!index.groups[0].records[1].visible); // flat scala.Set#size
        assert!(index.groups[1].visible);
        assert!(index.groups[1].records[0].visible); // grouped scala.Set#contains
    }

    #[test]
    fn test_smart_case_query_over_index() {
        let mut index = index();
        let state = FilterState::default().apply(FilterAction::SetQuery("BiSe".to_string()));
        // all three records carry "scala.BitSet#..." names, but the protected
        // one still fails the visibility predicate
        assert_eq!(apply_filter(&mut index, &state), 2);
    }
}
