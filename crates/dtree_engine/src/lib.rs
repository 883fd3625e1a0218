//! Arena-backed labeled tree with filesystem-like path addressing.
//!
//! The [`Tree`] owns every entity in a single arena keyed by [`NodeId`];
//! parent/child links are id lookups, never references, so cascade deletion
//! is a matter of dropping ids from the arena. All structural changes go
//! through the tree's mutation methods, which enforce sibling-name
//! uniqueness, assign monotonically increasing ids, and pad auxiliary
//! columns to the tree's schema.
//!
//! Subtrees round-trip through the nested [`Record`] format: serialization
//! is a pure function of the tree shape, and loading goes through the same
//! append path as any other insertion (so new ids are allocated).
//!
//! The tree is a single-owner, single-threaded structure; callers needing
//! concurrent access must add their own synchronization.
//!
//! [`NodeId`]: dtree_foundation::NodeId

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entity;
mod path;
mod record;
mod tree;

pub use entity::{Draft, Entity, EntityKind};
pub use path::Query;
pub use record::Record;
pub use tree::{DuplicatePolicy, Position, Tree};
