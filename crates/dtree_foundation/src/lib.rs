//! Core types for the DTree engine.
//!
//! This crate provides:
//! - [`Value`] - The column cell payload type
//! - [`NodeId`] - Monotonic entity identifiers
//! - [`Error`] - Structured error types
//!
//! Absence of a column value is expressed as `Option<Value>`; there is no
//! dedicated nil variant.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod id;
mod value;

pub use error::{Error, ErrorKind, Result};
pub use id::NodeId;
pub use value::{Value, ValueType};
