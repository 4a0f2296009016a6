//! Descendant nesting: rewrite `.foo .bar { .. }` into `.foo { .bar { .. } }`.

use crate::factory::{make_rule, FactoryError};
use crate::selector::split_selector_list;
use crate::tree::{NodeData, NodeId, RuleTree};

/// Convert direct-child rules of `container` whose selector list contains a
/// descendant combinator (internal whitespace) into nested parent/child rule
/// pairs, then recurse into every rule and conditional block below.
///
/// For each multi-token selector part, the parent selector is every token but
/// the last (space-joined) and the child selector is the last token alone. The
/// parent rule is found among the container's direct children or created; the
/// child rule likewise inside the parent. All declarations of the original
/// rule are cloned into the child, and the original rule is removed once every
/// part has been placed. Single-token parts in a mixed selector list keep
/// their declarations at the container level in a rule of their own.
///
/// Flattening is one level deep: a parent selector that itself still contains
/// whitespace (three or more tokens in the original part) is inserted
/// verbatim and not re-split.
pub fn nest_descendants(tree: &mut RuleTree, container: NodeId) -> Result<(), FactoryError> {
    // Snapshot the qualifying rules first; rules manufactured below must not
    // be re-examined at this level.
    let to_nest: Vec<NodeId> = tree
        .child_rules(container)
        .into_iter()
        .filter(|&rule| {
            selector_of(tree, rule)
                .map(|selector| {
                    split_selector_list(&selector)
                        .iter()
                        .any(|part| part.split_whitespace().nth(1).is_some())
                })
                .unwrap_or(false)
        })
        .collect();

    for &rule_id in &to_nest {
        let Some(selector) = selector_of(tree, rule_id) else {
            continue;
        };
        let decls: Vec<NodeData> = tree
            .walk_decls(rule_id)
            .into_iter()
            .filter_map(|decl| tree.get(decl).cloned())
            .collect();

        for part in split_selector_list(&selector) {
            let tokens: Vec<&str> = part.split_whitespace().collect();
            let target = if tokens.len() < 2 {
                // No combinator in this part: its declarations stay at this
                // level, in a sibling rule of their own.
                find_or_create_rule(tree, container, &part, &to_nest)?
            } else {
                let parent_selector = tokens[..tokens.len() - 1].join(" ");
                let child_selector = tokens[tokens.len() - 1];
                let parent = find_or_create_rule(tree, container, &parent_selector, &to_nest)?;
                find_or_create_rule(tree, parent, child_selector, &to_nest)?
            };
            for decl in &decls {
                tree.append(target, decl.clone());
            }
        }
        tree.remove(rule_id);
    }

    for child in tree.child_containers(container) {
        nest_descendants(tree, child)?;
    }
    Ok(())
}

fn selector_of(tree: &RuleTree, rule: NodeId) -> Option<String> {
    tree.get(rule)
        .and_then(NodeData::as_rule)
        .map(|rule| rule.selector.clone())
}

/// Find a direct-child rule of `container` with exactly `selector`, or create
/// one at the end of the container. Rules queued for nesting are never reused
/// as targets: they are about to be dissolved.
fn find_or_create_rule(
    tree: &mut RuleTree,
    container: NodeId,
    selector: &str,
    skip: &[NodeId],
) -> Result<NodeId, FactoryError> {
    let found = tree.child_rules(container).into_iter().find(|&id| {
        !skip.contains(&id)
            && tree
                .get(id)
                .and_then(NodeData::as_rule)
                .is_some_and(|rule| rule.selector == selector)
    });
    match found {
        Some(id) => Ok(id),
        None => {
            let rule = make_rule(tree, container, selector)?;
            Ok(tree.append(container, rule))
        }
    }
}
