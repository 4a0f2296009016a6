//! Node synthesis: new rules and declarations with inherited metadata.
//!
//! Passes cannot construct nodes out of thin air: a synthesized node must
//! carry the same construction-context metadata ([`Source`]) as the parsed
//! nodes around it. The factory finds a reference node of the needed kind —
//! first in the subtree under the supplied context node, then anywhere in the
//! tree — and clones its metadata onto the new node. Cloning an *existing*
//! node wholesale is done directly via [`NodeData::clone`]; the factory is
//! only for nodes that have no original.
//!
//! If no reference node of the needed kind exists anywhere, the factory fails
//! and the whole pipeline run aborts: a pass applied with half its nodes
//! missing would leave the tree in an inconsistent intermediate state.

use crate::tree::{Decl, NodeData, NodeId, Rule, RuleTree, Source};

/// Errors from node synthesis. Fatal to the pipeline run that hits them.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FactoryError {
    /// No rule exists anywhere in the tree to use as a construction reference.
    #[error("cannot synthesize a rule node: no reference rule exists in the tree")]
    MissingRuleReference,
    /// No declaration exists anywhere in the tree to use as a reference.
    #[error("cannot synthesize a declaration node: no reference declaration exists in the tree")]
    MissingDeclarationReference,
}

/// Create a new empty rule with the given selector, inheriting source
/// metadata from the nearest reference rule.
pub fn make_rule(tree: &RuleTree, context: NodeId, selector: &str) -> Result<Rule, FactoryError> {
    let source = find_reference(tree, context, NodeData::is_rule)
        .ok_or(FactoryError::MissingRuleReference)?;
    let mut rule = Rule::new(selector);
    rule.source = source;
    Ok(rule)
}

/// Create a new declaration with the given property and value, inheriting
/// source metadata from the nearest reference declaration.
pub fn make_decl(
    tree: &RuleTree,
    context: NodeId,
    prop: &str,
    value: &str,
) -> Result<Decl, FactoryError> {
    let source = find_reference(tree, context, NodeData::is_decl)
        .ok_or(FactoryError::MissingDeclarationReference)?;
    let mut decl = Decl::new(prop, value);
    decl.source = source;
    Ok(decl)
}

/// Find a node of the wanted kind and return its source metadata.
///
/// Searches the subtree under `context` first so synthesized nodes inherit
/// positions from nearby originals, then falls back to the whole tree.
fn find_reference(
    tree: &RuleTree,
    context: NodeId,
    wanted: impl Fn(&NodeData) -> bool,
) -> Option<Option<Source>> {
    let local = tree
        .walk_depth_first(context)
        .into_iter()
        .find(|&id| tree.get(id).is_some_and(&wanted));
    let reference = local.or_else(|| {
        tree.walk_depth_first(tree.root())
            .into_iter()
            .find(|&id| tree.get(id).is_some_and(&wanted))
    })?;
    Some(tree.get(reference).and_then(NodeData::source))
}
