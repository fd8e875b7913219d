//! Arena storage for schema trees.
//!
//! All nodes of one tree live in a single vector and refer to each other by
//! [`NodeId`]. Parent links are plain ids, so there are no ownership cycles.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use super::node::{Node, NodeId, Output, Shape};

/// Snapshot taken before a mutation that may need to be undone.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    len: usize,
    node: NodeId,
    saved: Node,
}

/// An arena of [`Node`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a detached node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Attach `child` under `parent`.
    ///
    /// List parents append to `items`; every other parent stores the child in
    /// `children` under its name, becoming a dict. A child with the same name
    /// as an existing one replaces it (last write wins).
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        if self[parent].shape == Shape::List {
            self.push_item(parent, child);
            return;
        }
        self[child].parent = Some(parent);
        let name = self[child].name.clone();
        let node = &mut self[parent];
        if let Some(replaced) = node.children.insert(name, child) {
            tracing::trace!(
                "child '{}' replaced in '{}' (node {} -> {})",
                self[child].name,
                self[parent].name,
                replaced.index(),
                child.index()
            );
        }
        let node = &mut self[parent];
        if node.shape != Shape::List {
            node.shape = Shape::Dict;
        }
    }

    /// Append `child` to the ordered items of `parent`, making it a list.
    pub fn push_item(&mut self, parent: NodeId, child: NodeId) {
        self[child].parent = Some(parent);
        let node = &mut self[parent];
        node.items.push(child);
        node.shape = Shape::List;
    }

    /// Look up a keyed child.
    pub fn get_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent)?.children.get(name).copied()
    }

    /// Detach a keyed child, returning it.
    pub fn pop_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let child = self.get_mut(parent)?.children.shift_remove(name)?;
        self[child].parent = None;
        Some(child)
    }

    /// Child name to raw value, for dict nodes.
    pub fn to_dict(&self, id: NodeId) -> IndexMap<String, String> {
        self[id]
            .children
            .iter()
            .map(|(name, child)| (name.clone(), self[*child].raw_value.clone()))
            .collect()
    }

    /// Project the node's visible value from its shape.
    ///
    /// Lists expose their items, dicts their children; scalars and enum
    /// references keep the value they already have. Idempotent.
    pub fn project(&mut self, id: NodeId) {
        let node = &mut self[id];
        match node.shape {
            Shape::List => node.output = Output::Items,
            Shape::Dict => node.output = Output::Children,
            Shape::Scalar | Shape::EnumRef => {}
        }
    }

    pub(crate) fn set_shape(&mut self, id: NodeId, shape: Shape) {
        self[id].shape = shape;
    }

    /// Deep copy of a subtree inside this arena. The copy is detached.
    pub fn duplicate(&mut self, id: NodeId) -> NodeId {
        let source = self.clone_subtree_source(id);
        self.graft(&source, NodeId::new(0))
    }

    fn clone_subtree_source(&self, id: NodeId) -> Tree {
        let mut scratch = Tree::new();
        scratch.graft(self, id);
        scratch
    }

    /// Deep copy of a subtree from `source` into this arena. The copy is
    /// detached; ids inside it are remapped.
    pub fn graft(&mut self, source: &Tree, id: NodeId) -> NodeId {
        let mut node = source[id].clone();
        node.parent = None;
        node.items = Vec::new();
        node.children = IndexMap::new();
        let new_id = self.alloc(node);

        let mut stack = vec![(id, new_id)];
        while let Some((from, to)) = stack.pop() {
            let items = source[from]
                .items
                .iter()
                .map(|&item| (item, self.alloc_detached_copy(source, item)))
                .collect::<Vec<_>>();
            for &(_, copy) in &items {
                self[copy].parent = Some(to);
            }
            self[to].items = items.iter().map(|&(_, copy)| copy).collect();

            let children = source[from]
                .children
                .iter()
                .map(|(name, &child)| (name.clone(), child, self.alloc_detached_copy(source, child)))
                .collect::<Vec<_>>();
            for (_, _, copy) in &children {
                self[*copy].parent = Some(to);
            }
            self[to].children = children
                .iter()
                .map(|(name, _, copy)| (name.clone(), *copy))
                .collect();

            stack.extend(items);
            stack.extend(children.into_iter().map(|(_, from, to)| (from, to)));
        }
        new_id
    }

    fn alloc_detached_copy(&mut self, source: &Tree, id: NodeId) -> NodeId {
        let mut node = source[id].clone();
        node.parent = None;
        node.items = Vec::new();
        node.children = IndexMap::new();
        self.alloc(node)
    }

    /// Remember the arena length and the state of `node`.
    pub fn checkpoint(&self, node: NodeId) -> Checkpoint {
        Checkpoint {
            len: self.nodes.len(),
            node,
            saved: self[node].clone(),
        }
    }

    /// Undo everything since `checkpoint`: drop nodes allocated after it and
    /// restore the checkpointed node. Only valid when no other pre-existing
    /// node was modified in between; the instantiation engine asserts this
    /// in debug builds.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.nodes.truncate(checkpoint.len);
        self[checkpoint.node] = checkpoint.saved;
    }

    /// Drop every node allocated at or after index `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Iterate the subtree rooted at `id` in pre-order (items, then children).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let node = &self[current];
            stack.extend(node.children.values().rev().copied());
            stack.extend(node.items.iter().rev().copied());
        }
        out
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
