//! Tree operations: append, insert-before, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The rule tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is
/// O(1). A `Root` node always exists; every other node has exactly one parent.
pub struct RuleTree {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
}

impl RuleTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let root = nodes.insert(NodeData::Root);
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
        }
    }

    /// The root node. Always valid.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist or is a declaration.
    pub fn append(&mut self, parent: NodeId, data: impl Into<NodeData>) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        debug_assert!(
            self.nodes.get(parent).is_some_and(NodeData::is_container),
            "parent must be a container"
        );
        let id = self.nodes.insert(data.into());
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Insert a node as a sibling immediately before `anchor`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `anchor` does not exist or has no parent.
    pub fn insert_before(&mut self, anchor: NodeId, data: impl Into<NodeData>) -> NodeId {
        debug_assert!(self.nodes.contains_key(anchor), "anchor node does not exist");
        let parent = self
            .parent
            .get(anchor)
            .copied()
            .expect("anchor must have a parent");
        let id = self.nodes.insert(data.into());
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have children vec");
        let position = siblings
            .iter()
            .position(|&child| child == anchor)
            .expect("anchor must be among its parent's children");
        siblings.insert(position, id);
        id
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if id == self.root || !self.nodes.contains_key(id) {
            return None;
        }

        // Detach from parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            // Queue children before removing.
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the tree, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            let kids = self.children(current);
            for &child in kids.iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::new()
    }
}
