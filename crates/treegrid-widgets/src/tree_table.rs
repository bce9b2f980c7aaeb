//! The tree-table widget: columns, actions, selection, hover highlighting.
//!
//! [`TreeTable`] is headless: it owns the node arena, the expand state, and
//! the current search/sort inputs, and hands a backend the projected rows
//! plus column metadata to draw. Interaction surfaces as returned
//! [`RowEvent`]s, never as an internal callback bus.
//!
//! The projection is cached and invalidated with a dirty flag; replacing
//! the data, editing the search term, changing the sort key, or toggling a
//! node all mark it dirty, and the next [`TreeTable::rows`] call reruns the
//! full filter → sort → project pipeline.

use std::collections::HashSet;

use treegrid_core::{ExpandState, NodeArena, NodeRecord, StructureError};

use crate::projection::{DisplayRow, SortKey, project};
use crate::stateful::{StateKey, Stateful};
use crate::{display_width, fit_cell};

/// Columns indent tree cells by two spaces per level.
const INDENT: &str = "  ";

/// Width policy for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Fit the widest cell (and the header).
    #[default]
    Auto,
    /// Fixed width in display columns; cells are truncated to fit.
    Fixed(usize),
}

/// Where a column's cell text comes from.
///
/// Named variants read the typed node fields; `Custom` is a caller-supplied
/// renderer for anything else.
#[derive(Debug, Clone, Copy)]
pub enum CellSource {
    /// The node's `name` field.
    Name,
    /// The node's `description` field.
    Description,
    /// The node's `code` field.
    Code,
    /// The node's `created_at` field, rendered as epoch milliseconds.
    CreatedAt,
    /// Caller-supplied cell renderer.
    Custom(fn(&NodeRecord) -> String),
}

/// One column of the table.
#[derive(Debug, Clone)]
pub struct Column {
    id: String,
    header: String,
    width: ColumnWidth,
    source: CellSource,
    tree_indent: bool,
}

impl Column {
    /// Create a column with an id, header label, and cell source.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>, source: CellSource) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width: ColumnWidth::default(),
            source,
            tree_indent: false,
        }
    }

    /// Set the width policy.
    #[must_use]
    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Mark this as the tree column: cells indent with the row's level.
    #[must_use]
    pub fn with_tree_indent(mut self) -> Self {
        self.tree_indent = true;
        self
    }

    /// Column id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header label.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Width policy.
    #[must_use]
    pub fn width(&self) -> ColumnWidth {
        self.width
    }

    /// Render the cell text for a node at the given projected level.
    ///
    /// Absent fields render empty. Fixed-width columns truncate with an
    /// ellipsis.
    #[must_use]
    pub fn cell(&self, node: &NodeRecord, level: usize) -> String {
        let raw = match self.source {
            CellSource::Name => node.name().unwrap_or("").to_string(),
            CellSource::Description => node.description().unwrap_or("").to_string(),
            CellSource::Code => node.code().unwrap_or("").to_string(),
            CellSource::CreatedAt => node
                .created_at()
                .map(|ms| ms.to_string())
                .unwrap_or_default(),
            CellSource::Custom(render) => render(node),
        };
        let text = if self.tree_indent {
            let mut t = INDENT.repeat(level);
            t.push_str(&raw);
            t
        } else {
            raw
        };
        match self.width {
            ColumnWidth::Auto => text,
            ColumnWidth::Fixed(w) => fit_cell(&text, w),
        }
    }
}

/// A row-scoped operation descriptor.
///
/// Invocation is reported back to the host as a [`RowEvent::Action`]; the
/// host owns the actual handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    id: String,
    label: String,
    icon: Option<String>,
}

impl RowAction {
    /// Create an action with an id and label.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
        }
    }

    /// Set the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Action id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Icon name, if set.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Interaction outcome reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    /// A row's selection flag flipped.
    SelectionToggled {
        /// Affected row id.
        id: String,
        /// Selection state after the toggle.
        selected: bool,
    },
    /// The select-all control flipped.
    SelectAllToggled {
        /// True if all visible rows are now selected, false if cleared.
        selected: bool,
    },
    /// A row action was invoked.
    Action {
        /// The action's id.
        action_id: String,
        /// The target row id.
        row_id: String,
    },
    /// A node's expand state flipped.
    ExpandToggled {
        /// Affected node id.
        id: String,
        /// Expand state after the toggle.
        expanded: bool,
    },
    /// The input did not map to a known row or action.
    Ignored,
}

/// Headless hierarchical table over a flat node list.
pub struct TreeTable {
    arena: NodeArena,
    expand: ExpandState,
    search: String,
    sort: SortKey,
    columns: Vec<Column>,
    actions: Vec<RowAction>,
    selected: HashSet<String>,
    hovered: Option<String>,
    cache: Vec<DisplayRow>,
    dirty: bool,
    persistence_id: Option<String>,
}

impl TreeTable {
    /// Build a table from a flat node list.
    ///
    /// Every node with children starts expanded. Fails on duplicate ids.
    pub fn new(nodes: Vec<NodeRecord>) -> Result<Self, StructureError> {
        let arena = NodeArena::new(nodes)?;
        let expand = ExpandState::seeded(&arena);
        Ok(Self {
            arena,
            expand,
            search: String::new(),
            sort: SortKey::default(),
            columns: Vec::new(),
            actions: Vec::new(),
            selected: HashSet::new(),
            hovered: None,
            cache: Vec::new(),
            dirty: true,
            persistence_id: None,
        })
    }

    /// Set the column definitions.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the row action descriptors.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Set a persistence id for state saving.
    #[must_use]
    pub fn with_persistence_id(mut self, id: impl Into<String>) -> Self {
        self.persistence_id = Some(id.into());
        self
    }

    /// Replace the full node list.
    ///
    /// Expand state reseeds (every parent expanded); prior per-node toggles
    /// are not preserved. Selections of ids that no longer exist are
    /// dropped; hover is cleared.
    pub fn set_nodes(&mut self, nodes: Vec<NodeRecord>) -> Result<(), StructureError> {
        let arena = NodeArena::new(nodes)?;
        self.expand = ExpandState::seeded(&arena);
        self.selected.retain(|id| arena.contains(id));
        self.hovered = None;
        self.arena = arena;
        self.dirty = true;
        Ok(())
    }

    /// Set the free-text search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.dirty = true;
        }
    }

    /// Set the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.dirty = true;
        }
    }

    /// Current search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current sort key.
    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Column definitions.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Row action descriptors.
    #[must_use]
    pub fn actions(&self) -> &[RowAction] {
        &self.actions
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.arena.get(id)
    }

    /// The underlying arena.
    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// The current expand state.
    #[must_use]
    pub fn expand_state(&self) -> &ExpandState {
        &self.expand
    }

    /// The projected rows to render, recomputing if any input changed.
    pub fn rows(&mut self) -> Result<&[DisplayRow], StructureError> {
        if self.dirty {
            self.cache = project(&self.arena, &self.search, self.sort, &self.expand)?;
            self.dirty = false;
        }
        Ok(&self.cache)
    }

    /// Flip a node's expand state.
    ///
    /// Only the one entry changes; the cached projection is invalidated.
    pub fn toggle_expanded(&mut self, id: &str) -> RowEvent {
        if !self.arena.contains(id) {
            return RowEvent::Ignored;
        }
        self.expand.toggle(id);
        self.dirty = true;
        RowEvent::ExpandToggled {
            id: id.to_string(),
            expanded: self.expand.is_expanded(id),
        }
    }

    /// Flip a row's selection flag.
    pub fn toggle_row_selected(&mut self, id: &str) -> RowEvent {
        if !self.arena.contains(id) {
            return RowEvent::Ignored;
        }
        let selected = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        };
        RowEvent::SelectionToggled {
            id: id.to_string(),
            selected,
        }
    }

    /// Select every visible row, or clear the selection if every visible
    /// row is already selected.
    pub fn toggle_select_all(&mut self) -> Result<RowEvent, StructureError> {
        let visible: Vec<String> = self.rows()?.iter().map(|r| r.id.clone()).collect();
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected.extend(visible);
        }
        Ok(RowEvent::SelectAllToggled {
            selected: !all_selected,
        })
    }

    /// Whether a row is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected row ids, in arbitrary order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Report a row-action invocation.
    ///
    /// Returns [`RowEvent::Ignored`] when the action or the row is unknown.
    #[must_use]
    pub fn invoke_action(&self, action_id: &str, row_id: &str) -> RowEvent {
        let known_action = self.actions.iter().any(|a| a.id() == action_id);
        if !known_action || !self.arena.contains(row_id) {
            return RowEvent::Ignored;
        }
        RowEvent::Action {
            action_id: action_id.to_string(),
            row_id: row_id.to_string(),
        }
    }

    /// Set (or clear) the hovered row.
    pub fn set_hovered(&mut self, id: Option<&str>) {
        self.hovered = id.map(str::to_string);
    }

    /// Whether a row should render highlighted for the current hover.
    ///
    /// True iff `id` is the hovered row, one of its ancestors, or one of
    /// its descendants. A structural fault during the walk degrades to
    /// "not highlighted" (the projection will report the error itself).
    #[must_use]
    pub fn is_highlighted(&self, id: &str) -> bool {
        let Some(hovered) = self.hovered.as_deref() else {
            return false;
        };
        if id == hovered {
            return true;
        }
        let related = self
            .arena
            .ancestors_of(hovered)
            .and_then(|ancestors| {
                if ancestors.iter().any(|a| a == id) {
                    return Ok(true);
                }
                let descendants = self.arena.descendants_of(hovered)?;
                Ok(descendants.iter().any(|d| d == id))
            });
        match related {
            Ok(hit) => hit,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(hovered, error = %_err, "highlight walk hit a structural fault");
                false
            }
        }
    }

    /// Resolved width of every column, recomputing the projection if
    /// needed.
    ///
    /// `Auto` columns fit their widest visible cell (including the header
    /// and tree indentation); `Fixed` columns report their budget.
    pub fn measure_columns(&mut self) -> Result<Vec<usize>, StructureError> {
        self.rows()?;
        let widths = self
            .columns
            .iter()
            .map(|col| match col.width() {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Auto => {
                    let mut max = display_width(col.header());
                    for row in &self.cache {
                        if let Some(node) = self.arena.get(&row.id) {
                            max = max.max(display_width(&col.cell(node, row.level)));
                        }
                    }
                    max
                }
            })
            .collect();
        Ok(widths)
    }
}

/// Persistable state for a [`TreeTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TreeTableState {
    /// Expanded node ids, sorted.
    pub expanded: Vec<String>,
    /// Selected row ids, sorted.
    pub selected: Vec<String>,
}

impl Stateful for TreeTable {
    type State = TreeTableState;

    fn state_key(&self) -> StateKey {
        StateKey::new(
            "TreeTable",
            self.persistence_id.as_deref().unwrap_or("default"),
        )
    }

    fn save_state(&self) -> TreeTableState {
        let mut expanded: Vec<String> =
            self.expand.expanded_ids().map(str::to_string).collect();
        expanded.sort_unstable();
        let mut selected: Vec<String> = self.selected.iter().cloned().collect();
        selected.sort_unstable();
        TreeTableState { expanded, selected }
    }

    fn restore_state(&mut self, state: TreeTableState) {
        let expanded: HashSet<&str> = state.expanded.iter().map(String::as_str).collect();
        let mut restored = ExpandState::new();
        for node in self.arena.iter() {
            if node.has_children() {
                restored.set(node.id(), expanded.contains(node.id()));
            }
        }
        self.expand = restored;
        self.selected = state
            .selected
            .into_iter()
            .filter(|id| self.arena.contains(id))
            .collect();
        self.hovered = None;
        self.dirty = true;
    }
}
