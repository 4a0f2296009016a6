//! Structural cleanup: prune rules left with no children.

use crate::tree::{NodeData, NodeId, RuleTree};

/// Recursively remove every rule under `container` that has no declarations
/// and no nested rules.
///
/// Children are cleaned before their parent is examined, so a rule whose only
/// content was empty nested rules is pruned in the same invocation. A single
/// call is idempotent: running it twice produces no further change.
/// Conditional blocks are recursed into but never pruned.
pub fn remove_empty_rules(tree: &mut RuleTree, container: NodeId) {
    for child in tree.child_containers(container) {
        remove_empty_rules(tree, child);
        let is_rule = tree.get(child).is_some_and(NodeData::is_rule);
        if is_rule && tree.children(child).is_empty() {
            tree.remove(child);
        }
    }
}
