//! Id-indexed arena over a flat node list, with cycle-guarded walks.
//!
//! # Design Invariants
//!
//! 1. **Unique ids**: construction rejects duplicate ids; the index maps
//!    every id to exactly one record.
//! 2. **No hangs**: `ancestors_of`, `descendants_of`, and `level_of` track
//!    visited ids and abort with [`StructureError::CycleDetected`] on a
//!    revisit. A cyclic input is a reported fault, never an infinite loop.
//! 3. **Tolerated faults**: a dangling `parent_id` makes the node behave as
//!    a root; a child id absent from the arena is skipped in lookups.
//!    Neither is an error (they surface in [`ValidationReport`] only).
//! 4. **Single sources of truth**: ancestry derives from `parent_id`;
//!    sibling order and `has_children` derive from `children`.

use std::collections::{HashMap, HashSet};

use crate::error::StructureError;
use crate::node::NodeRecord;

/// Flat owned node collection with an id index.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<NodeRecord>,
    index: HashMap<String, usize>,
}

impl NodeArena {
    /// Build an arena from a flat node list.
    ///
    /// Record order is preserved (it is the pre-sort root order). Fails with
    /// [`StructureError::DuplicateId`] if two records share an id.
    pub fn new(nodes: Vec<NodeRecord>) -> Result<Self, StructureError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id().to_string(), i).is_some() {
                return Err(StructureError::DuplicateId {
                    id: node.id().to_string(),
                });
            }
        }
        Ok(Self { nodes, index })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether an id resolves to a record.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter()
    }

    /// Iterate root records (`parent_id == None`) in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter().filter(|n| n.parent_id().is_none())
    }

    /// Ids of every ancestor of `id`, nearest first, excluding `id` itself.
    ///
    /// The walk follows `parent_id` upward and stops at a root or at a
    /// dangling reference (the node then counts as a root). An unknown `id`
    /// yields an empty list.
    pub fn ancestors_of(&self, id: &str) -> Result<Vec<String>, StructureError> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(id);

        let mut current = self.get(id);
        while let Some(node) = current {
            let Some(parent_id) = node.parent_id() else {
                break;
            };
            if !visited.insert(parent_id) {
                return Err(StructureError::CycleDetected {
                    id: parent_id.to_string(),
                });
            }
            match self.get(parent_id) {
                Some(parent) => {
                    out.push(parent_id.to_string());
                    current = Some(parent);
                }
                // Dangling parent: stop early, treat the chain end as root.
                None => break,
            }
        }
        Ok(out)
    }

    /// Ids of every descendant of `id` in pre-order, excluding `id` itself.
    ///
    /// Child ids absent from the arena are skipped. Any id reached twice
    /// aborts the walk: in a proper tree that can only mean a cycle (a
    /// shared child would also be a structural fault, and is reported the
    /// same way rather than emitted twice).
    pub fn descendants_of(&self, id: &str) -> Result<Vec<String>, StructureError> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(id.to_string());
        if let Some(node) = self.get(id) {
            self.collect_descendants(node, &mut visited, &mut out)?;
        }
        Ok(out)
    }

    fn collect_descendants(
        &self,
        node: &NodeRecord,
        visited: &mut HashSet<String>,
        out: &mut Vec<String>,
    ) -> Result<(), StructureError> {
        for child_id in node.children() {
            let Some(child) = self.get(child_id) else {
                continue;
            };
            if !visited.insert(child_id.clone()) {
                return Err(StructureError::CycleDetected {
                    id: child_id.clone(),
                });
            }
            out.push(child_id.clone());
            self.collect_descendants(child, visited, out)?;
        }
        Ok(())
    }

    /// Ancestor-hop count from `id` to its root.
    ///
    /// A root (including a node with a dangling `parent_id`) has level 0.
    /// An unknown id also yields 0.
    pub fn level_of(&self, id: &str) -> Result<usize, StructureError> {
        Ok(self.ancestors_of(id)?.len())
    }

    /// Scan the whole arena for structural faults.
    ///
    /// Cycles return an error. Tolerated faults (dangling parents, child
    /// ids that resolve to nothing) are collected into the report so a host
    /// can log or surface them without changing widget behavior.
    pub fn validate(&self) -> Result<ValidationReport, StructureError> {
        let mut report = ValidationReport::default();
        for node in &self.nodes {
            // ancestors_of carries the cycle guard for the upward chains.
            self.ancestors_of(node.id())?;
            if let Some(parent_id) = node.parent_id() {
                if !self.contains(parent_id) {
                    report.orphaned.push(node.id().to_string());
                }
            }
            for child_id in node.children() {
                if !self.contains(child_id) {
                    report
                        .missing_children
                        .push((node.id().to_string(), child_id.clone()));
                }
            }
        }
        // Upward chains miss cycles that are only closed through `children`
        // lists, so sweep those too.
        for node in &self.nodes {
            self.descendants_of(node.id())?;
        }
        Ok(report)
    }
}

/// Tolerated structural faults found by [`NodeArena::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Nodes whose `parent_id` resolves to nothing (behave as roots).
    pub orphaned: Vec<String>,
    /// `(node id, child id)` pairs where the child id resolves to nothing.
    pub missing_children: Vec<(String, String)>,
}

impl ValidationReport {
    /// Whether the arena has no tolerated faults at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty() && self.missing_children.is_empty()
    }
}
