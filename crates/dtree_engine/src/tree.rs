//! The tree: arena, identity allocator, and mutation engine.
//!
//! All structural changes go through the methods here. Uniqueness and
//! target validation run before any mutation, so a failed operation leaves
//! the tree unchanged.

use std::collections::HashMap;

use dtree_foundation::{Error, NodeId, Result, Value};

use crate::entity::{Draft, Entity};
use crate::path::Query;

/// Behavior when an insertion would duplicate a sibling name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Reject the insertion with a `DuplicateName` error.
    #[default]
    Raise,
    /// Insert the duplicate anyway.
    Ignore,
}

/// Insertion position for [`Tree::insert`].
///
/// `At` indices past the end clamp to the end; `Start` is the clamp target
/// for anything before the first position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// Before the first child.
    Start,
    /// At the given child index.
    At(usize),
    /// After the last child (the append sentinel).
    End,
}

/// A labeled tree of container and terminal entities.
///
/// The tree owns every entity in a single arena keyed by [`NodeId`] and is
/// always rooted at [`NodeId::ROOT`] (name `"."` by default, stripped from
/// computed paths). It also owns the identity allocator, the sibling-name
/// uniqueness policy, and the `data_columns` schema that every entity's
/// column sequence is padded to.
#[derive(Clone, Debug)]
pub struct Tree {
    arena: HashMap<NodeId, Entity>,
    /// Highest id handed out so far; the allocator state.
    last_id: u64,
    unique: bool,
    on_duplicate: DuplicatePolicy,
    data_columns: Vec<String>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates an empty tree with unique sibling names enforced, the
    /// `Raise` duplicate policy, and no column schema.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = HashMap::new();
        arena.insert(NodeId::ROOT, Entity::root(".".to_string()));
        Self {
            arena,
            last_id: 0,
            unique: true,
            on_duplicate: DuplicatePolicy::Raise,
            data_columns: Vec::new(),
        }
    }

    /// Sets the auxiliary column schema.
    ///
    /// Every entity's column sequence is right-padded with absent values to
    /// this length on insertion.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.data_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables sibling-name uniqueness.
    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Sets the behavior for attempted duplicate-name insertions.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Renames the root (default `"."`).
    ///
    /// The default root name is stripped from computed paths; a custom root
    /// name becomes a visible path prefix.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        if let Some(root) = self.arena.get_mut(&NodeId::ROOT) {
            root.set_name(name.into());
        }
        self
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Returns the root id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the entity with the given id, if it is in this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Entity> {
        self.arena.get(&id)
    }

    /// Returns true if the id refers to a live entity in this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains_key(&id)
    }

    /// Returns the entity's name, if it exists.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(&id).map(Entity::name)
    }

    /// Returns the entity's parent id (`None` for the root or a missing id).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(&id).and_then(Entity::parent)
    }

    /// Returns the child ids in insertion order (empty for terminals and
    /// missing ids).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(&id).map_or(&[], Entity::children)
    }

    /// Returns true if the id refers to a container.
    #[must_use]
    pub fn is_container(&self, id: NodeId) -> bool {
        self.arena.get(&id).is_some_and(Entity::is_container)
    }

    /// Returns the number of live entities, excluding the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    /// Returns true if the tree holds no entities besides the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the column schema.
    #[must_use]
    pub fn data_columns(&self) -> &[String] {
        &self.data_columns
    }

    /// Returns true if sibling-name uniqueness is enforced.
    #[must_use]
    pub const fn unique(&self) -> bool {
        self.unique
    }

    /// Returns the configured duplicate-name policy.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.on_duplicate
    }

    /// Computes the `/`-joined path from the root to the entity.
    ///
    /// Names are collected in root-to-entity order; the root's default `"."`
    /// name is stripped, so a top-level child's path reads `/ChildName`.
    /// Returns an empty string for ids not in this tree.
    #[must_use]
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(entity) = self.arena.get(&current) else {
                return String::new();
            };
            names.push(entity.name());
            cursor = entity.parent();
        }
        names.reverse();
        let joined = names.join("/");
        joined.trim_start_matches('.').to_string()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Appends a drafted entity to the end of `parent`'s child sequence.
    ///
    /// Assigns a fresh id, sets the parent link, and pads the columns to
    /// the schema length. Returns the new entity's id.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` / `NotAContainer` if `parent` is not a live container.
    /// - `DuplicateName` if uniqueness is enforced, the policy is `Raise`,
    ///   and a sibling already carries the drafted name.
    pub fn append(&mut self, parent: NodeId, draft: Draft) -> Result<NodeId> {
        self.attach(parent, Position::End, draft)
    }

    /// As [`Tree::append`], but at the given position.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Tree::append`].
    pub fn insert(&mut self, parent: NodeId, position: Position, draft: Draft) -> Result<NodeId> {
        self.attach(parent, position, draft)
    }

    fn attach(&mut self, parent: NodeId, position: Position, draft: Draft) -> Result<NodeId> {
        let parent_entity = self
            .arena
            .get(&parent)
            .ok_or_else(|| Error::node_not_found(parent))?;
        if !parent_entity.is_container() {
            return Err(Error::not_a_container(parent));
        }
        let child_count = parent_entity.children().len();

        if self.unique && self.on_duplicate == DuplicatePolicy::Raise {
            let clash = parent_entity.children().iter().any(|sibling| {
                self.arena
                    .get(sibling)
                    .is_some_and(|entity| entity.name() == draft.name())
            });
            if clash {
                let path = format!("{}/{}", self.path(parent), draft.name());
                return Err(Error::duplicate_name(path));
            }
        }

        let index = match position {
            Position::Start => 0,
            Position::At(index) => index.min(child_count),
            Position::End => child_count,
        };

        let id = self.allocate_id();
        let mut entity = Entity::from_draft(id, parent, draft);
        entity.pad_columns(self.data_columns.len());
        self.arena.insert(id, entity);
        self.arena
            .get_mut(&parent)
            .expect("parent presence checked above")
            .insert_child(index, id);
        Ok(id)
    }

    /// Deletes an entity and its entire subtree.
    ///
    /// # Errors
    ///
    /// - `RootDeletion` for the root id.
    /// - `NodeNotFound` if the id is not in this tree.
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        if id.is_root() {
            return Err(Error::root_deletion());
        }
        let parent = self
            .arena
            .get(&id)
            .ok_or_else(|| Error::node_not_found(id))?
            .parent();
        if let Some(parent) = parent {
            if let Some(parent_entity) = self.arena.get_mut(&parent) {
                parent_entity.remove_child(id);
            }
        }

        let mut doomed = Vec::new();
        self.collect_subtree(id, &mut doomed);
        for victim in doomed {
            self.arena.remove(&victim);
        }
        Ok(())
    }

    /// Copies the container `src` (and its whole subtree) under `dst`.
    ///
    /// The copy is reconstructed through the record round trip, so every
    /// created entity gets a fresh id. Returns the created ids in creation
    /// order, new subtree root first. Terminals produce no copies.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if `src` or `dst` is not in this tree.
    /// - `NotAContainer` if `dst` is a terminal.
    /// - `DuplicateName` if `dst` already has a child named like `src`.
    pub fn clone_subtree(&mut self, src: NodeId, dst: NodeId) -> Result<Vec<NodeId>> {
        let source = self
            .arena
            .get(&src)
            .ok_or_else(|| Error::node_not_found(src))?;
        if !source.is_container() {
            return Ok(Vec::new());
        }
        let name = source.name().to_string();
        // Snapshot before the new container lands, in case dst is inside src.
        let records = self.to_records(src);

        let new_root = self.append(dst, Draft::node(name))?;
        let mut created = vec![new_root];
        created.extend(self.populate(new_root, &records)?);
        Ok(created)
    }

    /// Moves the container `src` under `dst`.
    ///
    /// Implemented as copy-then-delete, so the moved entities get fresh ids;
    /// the original ids are gone. Returns the created ids in creation order.
    /// Terminals are left untouched and produce no moves.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Tree::clone_subtree`], plus `MoveIntoSubtree`
    /// when `dst` lies inside `src` (deleting the original would take the
    /// copy with it).
    pub fn move_subtree(&mut self, src: NodeId, dst: NodeId) -> Result<Vec<NodeId>> {
        let source = self
            .arena
            .get(&src)
            .ok_or_else(|| Error::node_not_found(src))?;
        if !source.is_container() {
            return Ok(Vec::new());
        }
        if self.is_in_subtree(dst, src) {
            return Err(Error::move_into_subtree(src, dst));
        }
        let created = self.clone_subtree(src, dst)?;
        self.delete(src)?;
        Ok(created)
    }

    /// Renumbers every entity sequentially in depth-first child order,
    /// starting from `start + 1`, and resets the allocator accordingly.
    ///
    /// Repairs numbering gaps left by deletions. The root keeps id 0.
    pub fn reindex(&mut self, start: u64) {
        let mut order = Vec::new();
        for child in self.children(NodeId::ROOT).to_vec() {
            self.collect_subtree(child, &mut order);
        }

        self.last_id = start;
        let mut mapping = HashMap::with_capacity(order.len() + 1);
        mapping.insert(NodeId::ROOT, NodeId::ROOT);
        for old in order {
            let new = self.allocate_id();
            mapping.insert(old, new);
        }

        let old_arena = std::mem::take(&mut self.arena);
        for (_, mut entity) in old_arena {
            entity.remap_links(&mapping);
            self.arena.insert(entity.id(), entity);
        }
    }

    // ------------------------------------------------------------------
    // Column access
    // ------------------------------------------------------------------

    /// Returns the value of schema column `index` for the entity.
    ///
    /// Column 0 is the entity's name; column `i >= 1` reads `columns[i-1]`.
    /// Out-of-range indices, absent cells, and missing ids all yield `None`
    /// (fail soft, never an error).
    #[must_use]
    pub fn column(&self, id: NodeId, index: usize) -> Option<Value> {
        let entity = self.arena.get(&id)?;
        if index == 0 {
            return Some(Value::from(entity.name()));
        }
        entity.columns().get(index - 1).cloned().flatten()
    }

    /// Returns the entity's raw column sequence.
    #[must_use]
    pub fn columns(&self, id: NodeId) -> Option<&[Option<Value>]> {
        self.arena.get(&id).map(Entity::columns)
    }

    /// Applies `(column index, value)` assignments to the entity.
    ///
    /// Index 0 renames the entity (rendering the value through `Display`);
    /// out-of-range indices and missing ids are skipped silently.
    pub fn set_columns(&mut self, id: NodeId, assignments: impl IntoIterator<Item = (usize, Value)>) {
        let Some(entity) = self.arena.get_mut(&id) else {
            return;
        };
        for (index, value) in assignments {
            if index == 0 {
                entity.set_name(value.to_string());
            } else {
                entity.set_column(index - 1, Some(value));
            }
        }
    }

    /// Renames the entity. Missing ids are ignored.
    ///
    /// Renames do not re-check sibling uniqueness.
    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) {
        if let Some(entity) = self.arena.get_mut(&id) {
            entity.set_name(name.into());
        }
    }

    /// Reads one cell addressed by a row query and a column index.
    ///
    /// The row is resolved through [`Tree::query`] starting at `from`;
    /// misses fail soft with `None`.
    #[must_use]
    pub fn cell(&self, from: NodeId, query: impl Into<Query>, column: usize) -> Option<Value> {
        let target = self.query(from, query)?;
        self.column(target, column)
    }

    /// Writes one cell addressed by a row query and a column index.
    ///
    /// Misses and out-of-range columns are ignored silently.
    pub fn set_cell(&mut self, from: NodeId, query: impl Into<Query>, column: usize, value: Value) {
        if let Some(target) = self.query(from, query) {
            self.set_columns(target, [(column, value)]);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Hands out the next id; strictly increasing, never reused outside
    /// [`Tree::reindex`].
    fn allocate_id(&mut self) -> NodeId {
        self.last_id += 1;
        NodeId::new(self.last_id)
    }

    /// Collects `id` and every descendant in depth-first child order.
    pub(crate) fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.collect_subtree(child, out);
        }
    }

    /// Returns true if `candidate` is `root` or one of its descendants.
    fn is_in_subtree(&self, candidate: NodeId, root: NodeId) -> bool {
        let mut cursor = Some(candidate);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.arena.get(&current).and_then(Entity::parent);
        }
        false
    }
}
