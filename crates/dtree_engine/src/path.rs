//! Path resolution and recursive search.
//!
//! Lookups favor "name equals" over "name contains": exact matches keep the
//! common case cheap and free of false positives, while the substring-of-path
//! mode supports queries like `"CountryName/ZoneName"` without every
//! intermediate segment being supplied. All misses are `None`, never errors,
//! so lookups chain freely.

use dtree_foundation::NodeId;

use crate::tree::Tree;

/// One query against the unified addressing surface.
///
/// Integers dispatch to [`Tree::find_by_id`], strings to
/// [`Tree::resolve_path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// Address by numeric id.
    Id(u64),
    /// Address by path or name.
    Path(String),
}

impl From<u64> for Query {
    fn from(raw: u64) -> Self {
        Self::Id(raw)
    }
}

impl From<NodeId> for Query {
    fn from(id: NodeId) -> Self {
        Self::Id(id.raw())
    }
}

impl From<&str> for Query {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for Query {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl Tree {
    /// Resolves a slash-delimited path to a single entity.
    ///
    /// A leading `/` anchors the first segment at the tree root's direct
    /// children; otherwise the search starts at `from` with the exact-name
    /// rules of [`Tree::find_exact`]. If the matched entity's own computed
    /// path already contains the queried string, it is returned directly;
    /// otherwise resolution recurses into it with the remaining segments.
    #[must_use]
    pub fn resolve_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        if !path.contains('/') {
            return self.find_exact(from, path);
        }

        let (item, rest) = if path.starts_with('/') {
            let mut segments = path.trim_start_matches('/').splitn(2, '/');
            let first = segments.next()?;
            let rest = segments.next();
            let item = self
                .children(self.root())
                .iter()
                .copied()
                .find(|&child| self.name(child) == Some(first))?;
            (item, rest)
        } else {
            let mut segments = path.splitn(2, '/');
            let first = segments.next()?;
            let rest = segments.next();
            (self.find_exact(from, first)?, rest)
        };

        if self.path(item).contains(path) {
            return Some(item);
        }
        self.resolve_path(item, rest?)
    }

    /// Returns the first entity named exactly `name`, depth first.
    ///
    /// All direct children of a container are checked before any descent.
    #[must_use]
    pub fn find_exact(&self, from: NodeId, name: &str) -> Option<NodeId> {
        let children = self.children(from);
        for &child in children {
            if self.name(child) == Some(name) {
                return Some(child);
            }
        }
        for &child in children {
            if self.is_container(child) {
                if let Some(found) = self.find_exact(child, name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Returns the entity with the given id within the subtree at `from`.
    ///
    /// Direct children are checked before recursing into non-empty
    /// containers; no id index is maintained, so this is O(subtree size).
    #[must_use]
    pub fn find_by_id(&self, from: NodeId, id: NodeId) -> Option<NodeId> {
        let children = self.children(from);
        for &child in children {
            if child == id {
                return Some(child);
            }
        }
        for &child in children {
            if self.is_container(child) && !self.children(child).is_empty() {
                if let Some(found) = self.find_by_id(child, id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Collects every entity matching `query`, in discovery order.
    ///
    /// An entity matches when its name equals `query` or its computed path
    /// contains `query` as a substring. Queries containing `/` fan out one
    /// extra level below containers whose own path does not already match;
    /// `recursive` keeps the search descending past matches, so a name can
    /// match at multiple depths. Duplicates are suppressed.
    #[must_use]
    pub fn find_all(&self, from: NodeId, query: &str, recursive: bool) -> Vec<NodeId> {
        let mut items = Vec::new();
        self.collect_matches(from, query, recursive, &mut items);
        items
    }

    fn collect_matches(&self, item: NodeId, query: &str, recursive: bool, items: &mut Vec<NodeId>) {
        if self.name(item) == Some(query) && !items.contains(&item) {
            items.push(item);
        }

        for &child in self.children(item) {
            if query.contains('/') && !self.path(child).contains(query) && self.is_container(child)
            {
                for &descendant in self.children(child) {
                    if self.path(descendant).contains(query) && !items.contains(&descendant) {
                        items.push(descendant);
                    }
                    if self.is_container(descendant) && recursive {
                        self.collect_matches(descendant, query, recursive, items);
                    }
                }
            } else {
                if self.path(child).contains(query) && !items.contains(&child) {
                    items.push(child);
                }
                // Matching does not stop the descent: a name can match at
                // multiple depths when the search is recursive.
                if recursive && self.is_container(child) {
                    self.collect_matches(child, query, recursive, items);
                }
            }
        }
    }

    /// Unified addressing entry point: integers go to [`Tree::find_by_id`],
    /// strings to [`Tree::resolve_path`].
    #[must_use]
    pub fn query(&self, from: NodeId, query: impl Into<Query>) -> Option<NodeId> {
        match query.into() {
            Query::Id(raw) => self.find_by_id(from, NodeId::new(raw)),
            Query::Path(path) => self.resolve_path(from, &path),
        }
    }
}
