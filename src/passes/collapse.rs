//! Sibling collapsing: merge nested rules with identical declaration sets.

use std::collections::BTreeMap;

use crate::factory::{make_rule, FactoryError};
use crate::selector::{split_selector_list, unique_ordered};
use crate::tree::{NodeData, NodeId, RuleTree};

/// Merge sibling rules with byte-identical declaration sets into one rule
/// with a combined selector list.
///
/// Grouping applies to the direct children of each *rule*; the stylesheet
/// root's own level is left to the factoring pass. Two siblings belong to the
/// same group when their direct declarations form the same `prop:value` set,
/// compared order-independently. A sibling that contains nested rules or
/// conditional blocks of its own is never grouped: merging it would discard
/// the nested structure.
///
/// Each group of two or more is replaced by a single rule whose selector is
/// the sorted, deduplicated union of the members' selector-list parts,
/// inserted where the first member stood.
pub fn collapse_nested_siblings(tree: &mut RuleTree, container: NodeId) -> Result<(), FactoryError> {
    if tree.get(container).is_some_and(NodeData::is_rule) {
        collapse_children(tree, container)?;
    }
    for child in tree.child_containers(container) {
        collapse_nested_siblings(tree, child)?;
    }
    Ok(())
}

fn collapse_children(tree: &mut RuleTree, rule: NodeId) -> Result<(), FactoryError> {
    let mut groups: BTreeMap<Vec<String>, Vec<NodeId>> = BTreeMap::new();
    for child in tree.child_rules(rule) {
        if !tree.child_containers(child).is_empty() {
            continue;
        }
        let mut signature: Vec<String> = tree
            .child_decls(child)
            .into_iter()
            .filter_map(|decl| tree.get(decl).and_then(NodeData::as_decl))
            .map(|decl| decl.key())
            .collect();
        signature.sort();
        groups.entry(signature).or_default().push(child);
    }

    for members in groups.into_values() {
        if members.len() < 2 {
            continue;
        }
        let mut parts: Vec<String> = members
            .iter()
            .filter_map(|&member| tree.get(member).and_then(NodeData::as_rule))
            .flat_map(|member| split_selector_list(&member.selector))
            .collect();
        parts = unique_ordered(parts);
        parts.sort();
        let selector = parts.join(", ");

        let merged = make_rule(tree, rule, &selector)?;
        let merged_id = tree.insert_before(members[0], merged);
        for decl in tree.child_decls(members[0]) {
            if let Some(data) = tree.get(decl).cloned() {
                tree.append(merged_id, data);
            }
        }
        for member in members {
            tree.remove(member);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{AtRule, Decl, Rule};

    fn decl_keys(tree: &RuleTree, rule: NodeId) -> Vec<String> {
        tree.child_decls(rule)
            .into_iter()
            .map(|id| tree.get(id).unwrap().as_decl().unwrap().key())
            .collect()
    }

    fn selector(tree: &RuleTree, rule: NodeId) -> String {
        tree.get(rule).unwrap().as_rule().unwrap().selector.clone()
    }

    #[test]
    fn merges_identical_siblings() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(p, Rule::new(".y"));
        let _yd = tree.append(y, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        let children = tree.child_rules(p);
        assert_eq!(children.len(), 1);
        assert_eq!(selector(&tree, children[0]), ".x, .y");
        assert_eq!(decl_keys(&tree, children[0]), vec!["color:red"]);
        assert!(!tree.contains(x));
        assert!(!tree.contains(y));
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _x1 = tree.append(x, Decl::new("color", "red"));
        let _x2 = tree.append(x, Decl::new("margin", "0"));
        let y = tree.append(p, Rule::new(".y"));
        let _y1 = tree.append(y, Decl::new("margin", "0"));
        let _y2 = tree.append(y, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        assert_eq!(tree.child_rules(p).len(), 1);
    }

    #[test]
    fn one_differing_pair_blocks_the_merge() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _x1 = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(p, Rule::new(".y"));
        let _y1 = tree.append(y, Decl::new("color", "red"));
        let _y2 = tree.append(y, Decl::new("margin", "0"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        assert_eq!(tree.child_rules(p), vec![x, y]);
    }

    #[test]
    fn root_level_siblings_are_not_collapsed() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new(".a"));
        let _ad = tree.append(a, Decl::new("color", "red"));
        let b = tree.append(root, Rule::new(".b"));
        let _bd = tree.append(b, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        assert_eq!(tree.child_rules(root), vec![a, b]);
    }

    #[test]
    fn merged_rule_takes_the_first_member_position() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let mid = tree.append(p, Rule::new(".mid"));
        let _midd = tree.append(mid, Decl::new("margin", "0"));
        let y = tree.append(p, Rule::new(".y"));
        let _yd = tree.append(y, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        let children = tree.child_rules(p);
        assert_eq!(children.len(), 2);
        assert_eq!(selector(&tree, children[0]), ".x, .y");
        assert_eq!(children[1], mid);
    }

    #[test]
    fn sibling_with_conditional_block_is_left_alone() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(p, Rule::new(".y"));
        let _yd = tree.append(y, Decl::new("color", "red"));
        let media = tree.append(y, AtRule::new("media", "print"));
        let inner = tree.append(media, Rule::new(".inner"));
        let _id = tree.append(inner, Decl::new("margin", "0"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        // .y's only structure is an @media block; it must survive intact.
        assert_eq!(tree.child_rules(p), vec![x, y]);
        assert_eq!(decl_keys(&tree, inner), vec!["margin:0"]);
    }

    #[test]
    fn sibling_with_nested_rules_is_left_alone() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".x"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(p, Rule::new(".y"));
        let _yd = tree.append(y, Decl::new("color", "red"));
        let _y_inner = tree.append(y, Rule::new(".inner"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        // .y has structure of its own; no merge happens.
        assert_eq!(tree.child_rules(p), vec![x, y]);
    }

    #[test]
    fn combined_selector_parts_are_deduped_and_sorted() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let p = tree.append(root, Rule::new(".p"));
        let x = tree.append(p, Rule::new(".y, .a"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(p, Rule::new(".a, .b"));
        let _yd = tree.append(y, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        let children = tree.child_rules(p);
        assert_eq!(selector(&tree, children[0]), ".a, .b, .y");
    }

    #[test]
    fn recurses_below_merged_level() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let outer = tree.append(root, Rule::new(".outer"));
        let inner = tree.append(outer, Rule::new(".inner"));
        let x = tree.append(inner, Rule::new(".x"));
        let _xd = tree.append(x, Decl::new("color", "red"));
        let y = tree.append(inner, Rule::new(".y"));
        let _yd = tree.append(y, Decl::new("color", "red"));

        collapse_nested_siblings(&mut tree, root).unwrap();

        let merged = tree.child_rules(inner);
        assert_eq!(merged.len(), 1);
        assert_eq!(selector(&tree, merged[0]), ".x, .y");
    }
}
