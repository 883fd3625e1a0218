//! DTree - In-memory labeled tree engine
//!
//! This crate re-exports all layers of the DTree system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: dtree_engine     — Arena tree, path resolution, mutation, records
//! Layer 0: dtree_foundation — Core types (Value, NodeId, Error)
//! ```

pub use dtree_engine as engine;
pub use dtree_foundation as foundation;
