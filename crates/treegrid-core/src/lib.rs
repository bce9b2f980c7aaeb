#![forbid(unsafe_code)]

//! Core: flat-list tree model, structural walks, and expand state.
//!
//! A tree is stored as a flat collection of [`NodeRecord`]s indexed by id.
//! Parent/child links are plain id references, never owning pointers, so the
//! graph cannot form ownership cycles and structural checks are linear scans.
//! All top-down and bottom-up walks carry a visited set and report a
//! [`StructureError::CycleDetected`] instead of looping.

pub mod arena;
pub mod error;
pub mod expand;
pub mod node;

pub use arena::{NodeArena, ValidationReport};
pub use error::StructureError;
pub use expand::ExpandState;
#[cfg(feature = "state-persistence")]
pub use expand::ExpandSnapshot;
pub use node::NodeRecord;
