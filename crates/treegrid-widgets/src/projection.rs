//! The filter → sort → project pipeline.
//!
//! Projection turns a flat node arena into the ordered, depth-annotated row
//! list a backend should draw. The whole pipeline reruns on any input
//! change; callers cache the result and invalidate with a dirty flag.
//!
//! # Design Invariants
//!
//! 1. **Pre-order**: a row immediately precedes its visible descendants;
//!    root rows interleave per sibling order.
//! 2. **Expand gating**: a node's children appear iff every ancestor on the
//!    projected path is expanded. The filter narrows the candidate set
//!    first, independent of expand state.
//! 3. **Sorted siblings**: sibling order follows the sort key applied to
//!    the filtered set, not the stored `children` order.
//! 4. **Filter does not retain ancestors**: a matching node whose parent is
//!    filtered out becomes a root of the projection. The match itself is
//!    never dropped; non-matching ancestors are never re-included.
//! 5. **No hangs**: a cyclic parent chain in the filtered set is reported
//!    as [`StructureError::CycleDetected`].

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use treegrid_core::{ExpandState, NodeArena, NodeRecord, StructureError};

/// Comparator selection for sibling ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first by `created_at` (default).
    #[default]
    CreatedAtDesc,
    /// Oldest first by `created_at`.
    CreatedAtAsc,
    /// Lexicographic by `name`.
    NameAsc,
    /// Reverse lexicographic by `name`.
    NameDesc,
}

impl SortKey {
    /// Compare two records under this key.
    ///
    /// An absent sort field orders last regardless of direction, so rows
    /// with no data never float to the top of a listing.
    #[must_use]
    pub fn compare(self, a: &NodeRecord, b: &NodeRecord) -> Ordering {
        match self {
            Self::CreatedAtDesc => compare_absent_last(a.created_at(), b.created_at(), true),
            Self::CreatedAtAsc => compare_absent_last(a.created_at(), b.created_at(), false),
            Self::NameAsc => compare_absent_last(a.name(), b.name(), false),
            Self::NameDesc => compare_absent_last(a.name(), b.name(), true),
        }
    }
}

fn compare_absent_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if descending {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring match against name, description, and code.
///
/// An empty term matches everything; an absent field matches nothing.
#[must_use]
pub fn search_matches(node: &NodeRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    node.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// One visible row of the projected tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Id of the projected node.
    pub id: String,
    /// Depth within the projected walk; a projection root is 0.
    ///
    /// Equals [`NodeArena::level_of`] whenever no filter drops an ancestor.
    pub level: usize,
    /// Whether the node's full `children` list is non-empty, independent of
    /// filtering and expand state.
    pub has_children: bool,
}

/// Project the arena into the ordered row list to render.
///
/// Pipeline: filter by `search`, sort by `sort`, identify projection roots
/// within the surviving set, then walk depth-first with `expand` gating
/// children at every level. Pure function of its four inputs.
pub fn project(
    arena: &NodeArena,
    search: &str,
    sort: SortKey,
    expand: &ExpandState,
) -> Result<Vec<DisplayRow>, StructureError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("project", nodes = arena.len(), search, ?sort).entered();

    let mut filtered: Vec<&NodeRecord> = arena.iter().filter(|n| search_matches(n, search)).collect();
    filtered.sort_by(|a, b| sort.compare(a, b));

    // Cyclic parent chains would silently vanish from the walk below (no
    // node in the cycle is a root), so they are rejected up front.
    for node in &filtered {
        arena.ancestors_of(node.id())?;
    }

    let in_filter: HashSet<&str> = filtered.iter().map(|n| n.id()).collect();
    let mut children_of: HashMap<&str, Vec<&NodeRecord>> = HashMap::new();
    let mut roots: Vec<&NodeRecord> = Vec::new();
    for &node in &filtered {
        match node.parent_id().filter(|p| in_filter.contains(p)) {
            Some(parent) => children_of.entry(parent).or_default().push(node),
            // True root, or a match whose parent was filtered out.
            None => roots.push(node),
        }
    }

    let mut rows = Vec::with_capacity(filtered.len());
    for root in roots {
        emit(root, 0, &children_of, expand, &mut rows);
    }
    Ok(rows)
}

fn emit(
    node: &NodeRecord,
    level: usize,
    children_of: &HashMap<&str, Vec<&NodeRecord>>,
    expand: &ExpandState,
    rows: &mut Vec<DisplayRow>,
) {
    rows.push(DisplayRow {
        id: node.id().to_string(),
        level,
        has_children: node.has_children(),
    });
    if expand.is_expanded(node.id()) {
        if let Some(kids) = children_of.get(node.id()) {
            for &kid in kids {
                emit(kid, level + 1, children_of, expand, rows);
            }
        }
    }
}
