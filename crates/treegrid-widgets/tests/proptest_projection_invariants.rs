//! Property-based invariant tests for the projection pipeline.
//!
//! These hold for any proper tree:
//!
//! 1. Pre-order: with everything expanded and no filter, every node appears
//!    exactly once, and the nearest preceding row with a smaller level is
//!    its parent.
//! 2. Collapse hides the subtree: a collapsed node stays visible, none of
//!    its strict descendants do.
//! 3. Level matches the arena's ancestor-hop count when nothing is
//!    filtered.
//! 4. `has_children` mirrors the full children list, independent of expand
//!    state.
//! 5. Sort reversal: `NameAsc` reversed equals `NameDesc` over the same
//!    records when names are distinct.
//! 6. Toggling a node twice restores the original projection.

use proptest::prelude::*;
use treegrid_core::{ExpandState, NodeArena, NodeRecord};
use treegrid_widgets::{DisplayRow, SortKey, project};

// ── Helpers ─────────────────────────────────────────────────────────────

fn build_nodes(parent_seed: &[usize]) -> Vec<NodeRecord> {
    let n = parent_seed.len() + 1;
    let parents: Vec<Option<usize>> = std::iter::once(None)
        .chain(parent_seed.iter().enumerate().map(|(i, &s)| Some(s % (i + 1))))
        .collect();

    let mut children: Vec<Vec<String>> = vec![Vec::new(); n];
    for (i, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            children[*p].push(i.to_string());
        }
    }

    (0..n)
        .map(|i| {
            let mut node = NodeRecord::new(i.to_string())
                .with_name(format!("n{i:03}"))
                .with_created_at(i as i64 * 1_000);
            node = node.with_children(children[i].clone());
            if let Some(p) = parents[i] {
                node = node.with_parent(p.to_string());
            }
            node
        })
        .collect()
}

fn arena_strategy() -> impl Strategy<Value = NodeArena> {
    prop::collection::vec(any::<usize>(), 0..40)
        .prop_map(|seed| NodeArena::new(build_nodes(&seed)).expect("generated ids are unique"))
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(vec![
        SortKey::CreatedAtDesc,
        SortKey::CreatedAtAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ])
}

fn parent_of<'a>(arena: &'a NodeArena, id: &str) -> Option<&'a str> {
    arena.get(id).and_then(NodeRecord::parent_id)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Pre-order traversal when fully expanded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn preorder_fully_expanded(arena in arena_strategy(), sort in sort_key_strategy()) {
        let expand = ExpandState::seeded(&arena);
        let rows = project(&arena, "", sort, &expand).unwrap();

        prop_assert_eq!(rows.len(), arena.len(), "every node appears exactly once");

        for (i, row) in rows.iter().enumerate() {
            if row.level == 0 {
                prop_assert!(parent_of(&arena, &row.id).is_none());
                continue;
            }
            // The nearest preceding row one level up is the parent.
            let parent_row = rows[..i]
                .iter()
                .rev()
                .find(|r| r.level < row.level)
                .expect("non-root row must have a shallower predecessor");
            prop_assert_eq!(parent_row.level, row.level - 1);
            prop_assert_eq!(
                Some(parent_row.id.as_str()),
                parent_of(&arena, &row.id),
                "row {} must sit under its parent", row.id
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Collapse hides exactly the subtree
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collapse_hides_subtree(
        arena in arena_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!arena.is_empty());
        let ids: Vec<String> = arena.iter().map(|n| n.id().to_string()).collect();
        let collapsed = ids[pick.index(ids.len())].clone();

        let mut expand = ExpandState::seeded(&arena);
        expand.set(collapsed.clone(), false);
        let rows = project(&arena, "", SortKey::NameAsc, &expand).unwrap();

        let visible: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        prop_assert!(visible.contains(&collapsed.as_str()), "collapsed node stays visible");

        let hidden = arena.descendants_of(&collapsed).unwrap();
        for id in &hidden {
            prop_assert!(!visible.contains(&id.as_str()), "descendant {id} must be hidden");
        }
        prop_assert_eq!(rows.len(), arena.len() - hidden.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Level equals ancestor-hop count when unfiltered
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn level_matches_arena(arena in arena_strategy(), sort in sort_key_strategy()) {
        let expand = ExpandState::seeded(&arena);
        for row in project(&arena, "", sort, &expand).unwrap() {
            prop_assert_eq!(row.level, arena.level_of(&row.id).unwrap());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. has_children mirrors the children list
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn has_children_matches(arena in arena_strategy()) {
        // Fully collapsed: has_children must still report the full list.
        let rows = project(&arena, "", SortKey::NameAsc, &ExpandState::new()).unwrap();
        for row in rows {
            prop_assert_eq!(
                row.has_children,
                arena.get(&row.id).unwrap().has_children()
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Name sort reversal symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn name_sort_reversal(seed in prop::collection::vec(any::<usize>(), 0..40)) {
        // Names are distinct by construction, so reversal is exact.
        let mut asc = build_nodes(&seed);
        let mut desc = asc.clone();
        asc.sort_by(|a, b| SortKey::NameAsc.compare(a, b));
        desc.sort_by(|a, b| SortKey::NameDesc.compare(a, b));
        asc.reverse();
        prop_assert_eq!(asc, desc);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Toggle twice restores the projection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn toggle_twice_is_identity(
        arena in arena_strategy(),
        pick in any::<prop::sample::Index>(),
        sort in sort_key_strategy(),
    ) {
        prop_assume!(!arena.is_empty());
        let ids: Vec<String> = arena.iter().map(|n| n.id().to_string()).collect();
        let target = &ids[pick.index(ids.len())];

        let mut expand = ExpandState::seeded(&arena);
        let before: Vec<DisplayRow> = project(&arena, "", sort, &expand).unwrap();
        expand.toggle(target);
        expand.toggle(target);
        let after = project(&arena, "", sort, &expand).unwrap();
        prop_assert_eq!(before, after);
    }
}
