//! Opt-in trait for widgets with persistable state.
//!
//! [`Stateful`] defines the save/restore contract for widget state that
//! should survive a session (expanded nodes, selected rows). Round-trip
//! fidelity is the contract: `restore_state(save_state())` must reproduce
//! the same observable state. Purely derived data (cached projections,
//! hover) is excluded from snapshots.
//!
//! Serialization of the state types themselves is gated behind the
//! `state-persistence` feature; the trait is always available.

use core::fmt;

/// Unique identifier for a widget's persisted state.
///
/// The `(widget_type, instance_id)` pair is the uniqueness invariant: two
/// distinct widget instances must produce distinct keys.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateKey {
    /// The widget type name (e.g., `"TreeTable"`).
    pub widget_type: &'static str,
    /// Instance-unique identifier within the host application.
    pub instance_id: String,
}

impl StateKey {
    /// Create a state key from a widget type and instance id.
    #[must_use]
    pub fn new(widget_type: &'static str, id: impl Into<String>) -> Self {
        Self {
            widget_type,
            instance_id: id.into(),
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.widget_type, self.instance_id)
    }
}

/// Contract for widgets that can save and restore their state.
pub trait Stateful {
    /// The persistable state payload.
    type State;

    /// Key identifying this widget instance's state blob.
    fn state_key(&self) -> StateKey;

    /// Capture the current persistable state. Must be a pure read.
    fn save_state(&self) -> Self::State;

    /// Apply a previously captured state. Must only mutate `self`.
    fn restore_state(&mut self, state: Self::State);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_equality() {
        let a = StateKey::new("TreeTable", "equipment");
        let b = StateKey::new("TreeTable", "equipment");
        let c = StateKey::new("TreeTable", "projects");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn key_display() {
        let key = StateKey::new("TreeTable", "labs");
        assert_eq!(key.to_string(), "TreeTable:labs");
    }
}
