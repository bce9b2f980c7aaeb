//! Node records: the typed row schema of the flat-list tree.
//!
//! Searchable and sortable fields (`name`, `description`, `code`,
//! `created_at`) are explicit optionals. A missing field is a typed absent
//! state that search treats as "does not match" and sort orders last; it is
//! never a runtime fault.

/// One entry in the hierarchical dataset.
///
/// `parent_id == None` marks a root. `children` holds direct child ids in
/// sibling display order. Both links are plain id references into the owning
/// [`NodeArena`](crate::NodeArena); ancestry is derived from `parent_id`,
/// sibling order and `has_children` from `children`.
///
/// # Example
///
/// ```
/// use treegrid_core::NodeRecord;
///
/// let node = NodeRecord::new("1")
///     .child("2")
///     .with_name("Ethics review")
///     .with_created_at(1_700_000_000_000);
///
/// assert_eq!(node.id(), "1");
/// assert!(node.has_children());
/// assert_eq!(node.parent_id(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    id: String,
    parent_id: Option<String>,
    children: Vec<String>,
    name: Option<String>,
    description: Option<String>,
    code: Option<String>,
    created_at: Option<i64>,
}

impl NodeRecord {
    /// Create a root record with the given id and no fields set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            children: Vec::new(),
            name: None,
            description: None,
            code: None,
            created_at: None,
        }
    }

    /// Set the parent id.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Append a child id.
    #[must_use]
    pub fn child(mut self, id: impl Into<String>) -> Self {
        self.children.push(id.into());
        self
    }

    /// Replace the child id list.
    #[must_use]
    pub fn with_children(mut self, ids: Vec<String>) -> Self {
        self.children = ids;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the short code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the creation timestamp (epoch milliseconds).
    #[must_use]
    pub fn with_created_at(mut self, millis: i64) -> Self {
        self.created_at = Some(millis);
        self
    }

    /// Unique, render-stable id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parent id, or `None` for a root.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Direct child ids in sibling display order.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Whether the `children` list is non-empty.
    ///
    /// Independent of filtering and expand state.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Display name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Short code, if set.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Creation timestamp in epoch milliseconds, if set.
    #[must_use]
    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    /// The searchable text fields in match order: name, description, code.
    ///
    /// Absent fields yield `None` and can never match a search term.
    #[must_use]
    pub fn search_fields(&self) -> [Option<&str>; 3] {
        [self.name(), self.description(), self.code()]
    }
}
