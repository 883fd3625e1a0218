//! Nested-record serialization: the exchange format for subtrees.
//!
//! A [`Record`] carries a `children` list iff the source entity was a
//! container, so the structural kind survives the round trip. Ids do not:
//! loading goes through the ordinary append path and allocates fresh ones.

use dtree_foundation::{NodeId, Result, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::Draft;
use crate::tree::Tree;

/// One entity in the nested exchange format.
///
/// `columns` is emitted exactly as stored in memory; padding to the target
/// tree's schema happens on load, not on serialize.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// The entity name.
    pub name: String,
    /// The auxiliary column values.
    #[cfg_attr(feature = "serde", serde(default))]
    pub columns: Vec<Option<Value>>,
    /// Child records; present (possibly empty) iff the source was a
    /// container.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub children: Option<Vec<Record>>,
}

impl Record {
    /// Builds a container record with no children yet.
    #[must_use]
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            children: Some(Vec::new()),
        }
    }

    /// Builds a terminal record.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            children: None,
        }
    }

    /// Sets the column values.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Option<Value>>) -> Self {
        self.columns = columns;
        self
    }

    /// Appends a single present column value.
    #[must_use]
    pub fn with_column(mut self, value: impl Into<Value>) -> Self {
        self.columns.push(Some(value.into()));
        self
    }

    /// Sets the child records (and thereby marks this record a container).
    #[must_use]
    pub fn with_children(mut self, children: Vec<Record>) -> Self {
        self.children = Some(children);
        self
    }

    /// Returns true if this record describes a container.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.children.is_some()
    }
}

impl Tree {
    /// Serializes the children of `from` as nested records, depth first and
    /// order preserving.
    #[must_use]
    pub fn to_records(&self, from: NodeId) -> Vec<Record> {
        self.children(from)
            .iter()
            .filter_map(|&child| self.record_for(child))
            .collect()
    }

    fn record_for(&self, id: NodeId) -> Option<Record> {
        let entity = self.get(id)?;
        let children = if entity.is_container() {
            Some(self.to_records(id))
        } else {
            None
        };
        Some(Record {
            name: entity.name().to_string(),
            columns: entity.columns().to_vec(),
            children,
        })
    }

    /// Reconstructs entities under `parent` from nested records.
    ///
    /// Every record goes through [`Tree::append`], so uniqueness, id
    /// assignment, and column padding apply uniformly. Returns every created
    /// id in creation order (each parent before its children), enabling bulk
    /// post-processing after a structural load.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Tree::append`] failure; records created before
    /// the failure remain in the tree.
    pub fn populate(&mut self, parent: NodeId, records: &[Record]) -> Result<Vec<NodeId>> {
        let mut created = Vec::new();
        for record in records {
            let draft = if record.is_container() {
                Draft::node(record.name.clone())
            } else {
                Draft::leaf(record.name.clone())
            };
            let id = self.append(parent, draft.with_columns(record.columns.clone()))?;
            created.push(id);
            if let Some(children) = &record.children {
                created.extend(self.populate(id, children)?);
            }
        }
        Ok(created)
    }
}
