//! Integration tests for Layer 1: Engine
//!
//! Tests for tree mutation, path resolution, record serialization, and
//! reindexing.

mod paths;
mod records;
mod reindex;
