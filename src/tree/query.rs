//! Tree queries: direct-child and deep rule/declaration lookups.

use super::arena::RuleTree;
use super::node::{NodeData, NodeId};

impl RuleTree {
    /// Direct children of `container` that are rules, in document order.
    pub fn child_rules(&self, container: NodeId) -> Vec<NodeId> {
        self.children(container)
            .iter()
            .copied()
            .filter(|&child| self.get(child).is_some_and(NodeData::is_rule))
            .collect()
    }

    /// Direct children of `container` that are declarations, in document order.
    pub fn child_decls(&self, container: NodeId) -> Vec<NodeId> {
        self.children(container)
            .iter()
            .copied()
            .filter(|&child| self.get(child).is_some_and(NodeData::is_decl))
            .collect()
    }

    /// Direct children of `container` that are rules or conditional blocks,
    /// in document order. These are the nodes every pass recurses into.
    pub fn child_containers(&self, container: NodeId) -> Vec<NodeId> {
        self.children(container)
            .iter()
            .copied()
            .filter(|&child| {
                self.get(child)
                    .is_some_and(|data| data.is_rule() || data.is_at_rule())
            })
            .collect()
    }

    /// All rules in the subtree under `from` (excluding `from` itself), in
    /// document order.
    pub fn walk_rules(&self, from: NodeId) -> Vec<NodeId> {
        self.walk_depth_first(from)
            .into_iter()
            .skip(1)
            .filter(|&id| self.get(id).is_some_and(NodeData::is_rule))
            .collect()
    }

    /// All declarations in the subtree under `from` (excluding `from`
    /// itself), in document order.
    pub fn walk_decls(&self, from: NodeId) -> Vec<NodeId> {
        self.walk_depth_first(from)
            .into_iter()
            .skip(1)
            .filter(|&id| self.get(id).is_some_and(NodeData::is_decl))
            .collect()
    }

    /// Find the first direct-child rule of `container` with exactly the given
    /// selector text.
    pub fn find_child_rule(&self, container: NodeId, selector: &str) -> Option<NodeId> {
        self.children(container).iter().copied().find(|&child| {
            self.get(child)
                .and_then(NodeData::as_rule)
                .is_some_and(|rule| rule.selector == selector)
        })
    }
}
