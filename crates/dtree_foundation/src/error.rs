//! Error types for the DTree engine.
//!
//! Uses `thiserror` for ergonomic error definition.
//!
//! Only structural violations surface as errors; lookup misses are
//! represented as `Option::None` throughout the engine so that lookups can
//! be chained without error handling.

use thiserror::Error;

use crate::id::NodeId;

/// A specialized `Result` type for DTree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for DTree operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a duplicate name error for the attempted path.
    #[must_use]
    pub fn duplicate_name(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName { path: path.into() })
    }

    /// Creates a node not found error.
    #[must_use]
    pub fn node_not_found(id: NodeId) -> Self {
        Self::new(ErrorKind::NodeNotFound(id))
    }

    /// Creates a not-a-container error.
    #[must_use]
    pub fn not_a_container(id: NodeId) -> Self {
        Self::new(ErrorKind::NotAContainer(id))
    }

    /// Creates a root deletion error.
    #[must_use]
    pub fn root_deletion() -> Self {
        Self::new(ErrorKind::RootDeletion)
    }

    /// Creates a move-into-own-subtree error.
    #[must_use]
    pub fn move_into_subtree(source: NodeId, destination: NodeId) -> Self {
        Self::new(ErrorKind::MoveIntoSubtree {
            source,
            destination,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A sibling with the same name already exists and the tree enforces
    /// unique names. The check runs before any mutation, so the tree is
    /// left unchanged.
    #[error("duplicate name {path} found")]
    DuplicateName {
        /// The path the entity would have occupied.
        path: String,
    },

    /// The referenced node does not exist in the tree arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The operation requires a container but the target is a terminal.
    #[error("not a container: {0:?}")]
    NotAContainer(NodeId),

    /// The tree root cannot be deleted.
    #[error("the tree root cannot be deleted")]
    RootDeletion,

    /// A subtree cannot be moved into itself or one of its descendants.
    #[error("cannot move {source:?} into its own subtree (destination {destination:?})")]
    MoveIntoSubtree {
        /// The subtree being moved.
        // `r#source` prevents thiserror from treating this field as the
        // error's source(); it is the same field name as `source`.
        r#source: NodeId,
        /// The offending destination.
        destination: NodeId,
    },
}
