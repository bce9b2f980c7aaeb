//! Structural-integrity errors for node graphs.

use core::fmt;

/// Fatal structural fault in a node graph.
///
/// Dangling references (a `parent_id` or child id that resolves to nothing)
/// are tolerated and degrade to orphan/skip behavior; they never produce an
/// error. Cycles and duplicate ids are precondition violations and are
/// always reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A walk revisited `id`, so the graph is not a tree.
    CycleDetected {
        /// First id seen twice during the walk.
        id: String,
    },
    /// Two records share `id`; the arena index requires unique ids.
    DuplicateId {
        /// The offending id.
        id: String,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected { id } => {
                write!(f, "node graph contains a cycle through id {id:?}")
            }
            Self::DuplicateId { id } => {
                write!(f, "duplicate node id {id:?}")
            }
        }
    }
}

impl std::error::Error for StructureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_cycle() {
        let err = StructureError::CycleDetected { id: "a".into() };
        assert!(err.to_string().contains("cycle"));
        assert!(err.to_string().contains("\"a\""));
    }

    #[test]
    fn display_duplicate() {
        let err = StructureError::DuplicateId { id: "x".into() };
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&StructureError::CycleDetected { id: String::new() });
    }
}
