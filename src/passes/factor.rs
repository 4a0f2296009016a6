//! Common-property factoring: hoist shared `prop:value` pairs out of siblings.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::factory::{make_decl, make_rule, FactoryError};
use crate::passes::cleanup::remove_empty_rules;
use crate::selector::{split_selector_list, unique_ordered};
use crate::tree::{NodeData, NodeId, RuleTree};

/// A `prop:value` pair, compared as exact text.
type PropValue = (String, String);

/// Extract every `prop:value` pair shared by two or more sibling rules into a
/// new rule preceding them.
///
/// Pairs are grouped by the exact set of sibling indices that contain them: a
/// pair shared by siblings {0,2} forms a different group from one shared by
/// {0,1,2}. Each group becomes one new rule whose selector is the sorted,
/// deduplicated union of the sharing siblings' selector-list parts, inserted
/// immediately before the first sharing sibling; the matched declarations are
/// then removed from the siblings themselves. Groups are processed in sorted
/// index-set order so output is deterministic.
///
/// Only each sibling's direct declarations participate; declarations inside
/// nested rules belong to a different effective selector and are never
/// hoisted. Siblings drained of all content disappear via structural cleanup.
pub fn factor_common_props(tree: &mut RuleTree, container: NodeId) -> Result<(), FactoryError> {
    let rules = tree.child_rules(container);
    if rules.len() >= 2 {
        factor_siblings(tree, container, &rules)?;
    }
    for child in tree.child_containers(container) {
        factor_common_props(tree, child)?;
    }
    Ok(())
}

fn factor_siblings(
    tree: &mut RuleTree,
    container: NodeId,
    rules: &[NodeId],
) -> Result<(), FactoryError> {
    // Which sibling indices contain each pair. A pair duplicated inside one
    // sibling still counts that sibling once.
    let mut sharers: HashMap<PropValue, BTreeSet<usize>> = HashMap::new();
    let mut encounter_order: Vec<PropValue> = Vec::new();
    for (index, &rule) in rules.iter().enumerate() {
        for decl in tree.child_decls(rule) {
            let Some(decl) = tree.get(decl).and_then(NodeData::as_decl) else {
                continue;
            };
            let pair = (decl.prop.clone(), decl.value.clone());
            if !sharers.contains_key(&pair) {
                encounter_order.push(pair.clone());
            }
            sharers.entry(pair).or_default().insert(index);
        }
    }

    // Group pairs by their exact sharing index set; iterate sets in sorted
    // order, pairs within a set in first-encounter order.
    let mut groups: BTreeMap<Vec<usize>, Vec<PropValue>> = BTreeMap::new();
    for pair in encounter_order {
        let indices: Vec<usize> = sharers[&pair].iter().copied().collect();
        if indices.len() < 2 {
            continue;
        }
        groups.entry(indices).or_default().push(pair);
    }

    for (indices, pairs) in groups {
        let mut parts: Vec<String> = indices
            .iter()
            .filter_map(|&index| tree.get(rules[index]).and_then(NodeData::as_rule))
            .flat_map(|rule| split_selector_list(&rule.selector))
            .collect();
        parts = unique_ordered(parts);
        parts.sort();
        let selector = parts.join(", ");

        let factored = make_rule(tree, container, &selector)?;
        let factored_id = tree.insert_before(rules[indices[0]], factored);
        for (prop, value) in &pairs {
            let decl = make_decl(tree, container, prop, value)?;
            tree.append(factored_id, decl);
        }

        // Drop every matching declaration, duplicates included.
        for &index in &indices {
            for decl_id in tree.child_decls(rules[index]) {
                let matched = tree
                    .get(decl_id)
                    .and_then(NodeData::as_decl)
                    .is_some_and(|decl| {
                        pairs
                            .iter()
                            .any(|(prop, value)| decl.prop == *prop && decl.value == *value)
                    });
                if matched {
                    tree.remove(decl_id);
                }
            }
        }
    }

    remove_empty_rules(tree, container);
    Ok(())
}
