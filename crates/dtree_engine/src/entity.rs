//! Entity model: the arena records that make up a tree.

use std::collections::HashMap;

use dtree_foundation::{NodeId, Value};

/// The two structural kinds of entity.
///
/// A container owns an ordered child-id sequence (insertion order is
/// significant and preserved across all operations); a terminal is
/// structurally forbidden from owning one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Entity that owns an ordered sequence of child entities.
    Container {
        /// Child ids in insertion order.
        children: Vec<NodeId>,
    },
    /// Entity with no children.
    Terminal,
}

/// A single entity stored in the tree arena.
///
/// Every entity carries an id (unique within its tree), a name used for
/// path segments, an ordered sequence of optional column values, and a
/// non-owning back-reference to its parent. Column 0 is conceptually the
/// name and is not stored in `columns`; `columns[i]` corresponds to schema
/// column `i + 1`.
#[derive(Clone, Debug)]
pub struct Entity {
    id: NodeId,
    name: String,
    columns: Vec<Option<Value>>,
    parent: Option<NodeId>,
    kind: EntityKind,
}

impl Entity {
    pub(crate) fn root(name: String) -> Self {
        Self {
            id: NodeId::ROOT,
            name,
            columns: Vec::new(),
            parent: None,
            kind: EntityKind::Container {
                children: Vec::new(),
            },
        }
    }

    pub(crate) fn from_draft(id: NodeId, parent: NodeId, draft: Draft) -> Self {
        let kind = if draft.container {
            EntityKind::Container {
                children: Vec::new(),
            }
        } else {
            EntityKind::Terminal
        };
        Self {
            id,
            name: draft.name,
            columns: draft.columns,
            parent: Some(parent),
            kind,
        }
    }

    /// Returns this entity's id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns this entity's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the auxiliary column values.
    #[must_use]
    pub fn columns(&self) -> &[Option<Value>] {
        &self.columns
    }

    /// Returns the id of the enclosing container, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the structural kind of this entity.
    #[must_use]
    pub const fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Returns true if this entity is a container.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self.kind, EntityKind::Container { .. })
    }

    /// Returns the child ids in insertion order (empty for terminals).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            EntityKind::Container { children } => children,
            EntityKind::Terminal => &[],
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_column(&mut self, index: usize, value: Option<Value>) {
        if let Some(slot) = self.columns.get_mut(index) {
            *slot = value;
        }
    }

    /// Right-pads the column sequence with absent values up to the schema
    /// length. Longer sequences are left alone.
    pub(crate) fn pad_columns(&mut self, len: usize) {
        if self.columns.len() < len {
            self.columns.resize(len, None);
        }
    }

    pub(crate) fn insert_child(&mut self, index: usize, id: NodeId) {
        if let EntityKind::Container { children } = &mut self.kind {
            children.insert(index, id);
        }
    }

    pub(crate) fn remove_child(&mut self, id: NodeId) {
        if let EntityKind::Container { children } = &mut self.kind {
            if let Some(position) = children.iter().position(|&child| child == id) {
                children.remove(position);
            }
        }
    }

    /// Rewrites the id, parent, and child links through a reindex mapping.
    pub(crate) fn remap_links(&mut self, mapping: &HashMap<NodeId, NodeId>) {
        let remap = |id: NodeId| mapping.get(&id).copied().unwrap_or(id);
        self.id = remap(self.id);
        self.parent = self.parent.map(remap);
        if let EntityKind::Container { children } = &mut self.kind {
            for child in children {
                *child = remap(*child);
            }
        }
    }
}

/// A detached entity description, ready to be attached to a tree.
///
/// Built with [`Draft::node`] or [`Draft::leaf`] and handed to the tree's
/// `append`/`insert`, which assign the id, set the parent link, and pad the
/// columns to the tree schema.
#[derive(Clone, Debug)]
pub struct Draft {
    name: String,
    columns: Vec<Option<Value>>,
    container: bool,
}

impl Draft {
    /// Describes a container entity with the given name.
    #[must_use]
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            container: true,
        }
    }

    /// Describes a terminal entity with the given name.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            container: false,
        }
    }

    /// Sets the full column sequence.
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

    /// Returns the draft's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this draft describes a container.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.container
    }
}
