//! Per-node expand/collapse state.
//!
//! Each node with children is a two-state machine (`expanded` /
//! `collapsed`) that only transitions on an explicit toggle. State is keyed
//! by id in a plain map; an absent entry reads as collapsed. Reseeding on a
//! data replacement discards prior entries rather than carrying them over.

use std::collections::HashMap;

use crate::arena::NodeArena;

/// Mapping from node id to expanded flag.
///
/// Seeded state marks every node with a non-empty `children` list expanded;
/// everything else (leaves, unknown ids) reads as collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    map: HashMap<String, bool>,
}

impl ExpandState {
    /// Empty state: every id reads as collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default-populate from an arena: every parent starts expanded.
    ///
    /// Called whenever the source data list is replaced; entries for ids no
    /// longer present are dropped along with the rest of the old map.
    #[must_use]
    pub fn seeded(arena: &NodeArena) -> Self {
        let map = arena
            .iter()
            .filter(|n| n.has_children())
            .map(|n| (n.id().to_string(), true))
            .collect();
        Self { map }
    }

    /// Whether `id` is expanded. Absent entries are collapsed.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.map.get(id).copied().unwrap_or(false)
    }

    /// Set a single entry without touching the others.
    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        self.map.insert(id.into(), expanded);
    }

    /// Flip a single entry. An absent entry reads as collapsed, so the
    /// first toggle of an untracked id expands it.
    pub fn toggle(&mut self, id: &str) {
        let entry = self.map.entry(id.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Expand every parent in the arena.
    pub fn expand_all(&mut self, arena: &NodeArena) {
        for node in arena.iter() {
            if node.has_children() {
                self.map.insert(node.id().to_string(), true);
            }
        }
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        for flag in self.map.values_mut() {
            *flag = false;
        }
    }

    /// Ids currently expanded, in arbitrary order.
    pub fn expanded_ids(&self) -> impl Iterator<Item = &str> {
        self.map
            .iter()
            .filter(|&(_, &expanded)| expanded)
            .map(|(id, _)| id.as_str())
    }

    /// Capture the expanded-id set for persistence.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn snapshot(&self) -> ExpandSnapshot {
        let mut expanded: Vec<String> =
            self.expanded_ids().map(str::to_string).collect();
        expanded.sort_unstable();
        ExpandSnapshot { expanded }
    }

    /// Rebuild the map from a snapshot: listed ids expand, all else
    /// collapses.
    #[cfg(feature = "state-persistence")]
    pub fn restore(&mut self, snapshot: &ExpandSnapshot) {
        self.map = snapshot
            .expanded
            .iter()
            .map(|id| (id.clone(), true))
            .collect();
    }
}

/// Persistable expand state: the set of expanded node ids.
#[cfg(feature = "state-persistence")]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExpandSnapshot {
    /// Expanded ids, sorted for stable serialization.
    pub expanded: Vec<String>,
}
