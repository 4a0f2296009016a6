//! Pseudo nesting: fold `a:hover` into `a` as `&:hover`.

use crate::factory::{make_rule, FactoryError};
use crate::selector::{is_direct_pseudo_extension, split_selector_list};
use crate::tree::{NodeData, NodeId, RuleTree};

/// Absorb sibling rules that are pure pseudo extensions of a base rule's
/// selector into that base, rewritten with the implicit-parent marker `&`.
///
/// For each direct-child rule and each part `s` of its selector list, every
/// *other* sibling rule whose selector-list parts are all direct pseudo
/// extensions of `s` is absorbed: its parts become `&` plus the suffix beyond
/// `s`, a nested rule with the absorbed declarations is appended to the base,
/// and the sibling is removed. A candidate with even one non-matching part is
/// left alone, as is one that carries nested rules or conditional blocks of
/// its own (absorbing it would discard that structure). A rule already absorbed is never revisited
/// as a base or a candidate.
pub fn nest_pseudos(tree: &mut RuleTree, container: NodeId) -> Result<(), FactoryError> {
    let rules = tree.child_rules(container);
    for &base in &rules {
        if !tree.contains(base) {
            continue;
        }
        let Some(base_parts) = selector_parts(tree, base) else {
            continue;
        };
        for s in base_parts {
            let candidates: Vec<NodeId> = rules
                .iter()
                .copied()
                .filter(|&candidate| {
                    candidate != base
                        && tree.contains(candidate)
                        && tree.child_containers(candidate).is_empty()
                        && selector_parts(tree, candidate).is_some_and(|parts| {
                            !parts.is_empty()
                                && parts
                                    .iter()
                                    .all(|part| is_direct_pseudo_extension(&s, part))
                        })
                })
                .collect();
            for candidate in candidates {
                absorb(tree, base, candidate, &s)?;
            }
        }
    }

    for child in tree.child_containers(container) {
        nest_pseudos(tree, child)?;
    }
    Ok(())
}

fn selector_parts(tree: &RuleTree, rule: NodeId) -> Option<Vec<String>> {
    tree.get(rule)
        .and_then(NodeData::as_rule)
        .map(|rule| split_selector_list(&rule.selector))
}

/// Rewrite `candidate`'s selector parts against the base part `s`, append the
/// rewritten rule inside `base`, and remove `candidate`.
fn absorb(
    tree: &mut RuleTree,
    base: NodeId,
    candidate: NodeId,
    s: &str,
) -> Result<(), FactoryError> {
    let parts = selector_parts(tree, candidate).unwrap_or_default();
    let rewritten: Vec<String> = parts
        .iter()
        .map(|part| format!("&{}", &part[s.len()..]))
        .collect();
    let nested = make_rule(tree, base, &rewritten.join(", "))?;
    let nested_id = tree.append(base, nested);
    for decl in tree.child_decls(candidate) {
        if let Some(data) = tree.get(decl).cloned() {
            tree.append(nested_id, data);
        }
    }
    tree.remove(candidate);
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
    fn absorbs_hover_into_base() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let hover = tree.append(root, Rule::new("a:hover"));
        let _h1 = tree.append(hover, Decl::new("color", "green"));

        nest_pseudos(&mut tree, root).unwrap();

        assert!(!tree.contains(hover));
        assert_eq!(tree.child_rules(root), vec![a]);
        let nested = tree.child_rules(a);
        assert_eq!(nested.len(), 1);
        assert_eq!(selector(&tree, nested[0]), "&:hover");
        assert_eq!(decl_keys(&tree, nested[0]), vec!["color:green"]);
        assert_eq!(decl_keys(&tree, a), vec!["color:blue"]);
    }

    #[test]
    fn absorbs_pseudo_element() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new(".x"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let before = tree.append(root, Rule::new(".x::before"));
        let _b1 = tree.append(before, Decl::new("content", "\"*\""));

        nest_pseudos(&mut tree, root).unwrap();

        let nested = tree.child_rules(a);
        assert_eq!(selector(&tree, nested[0]), "&::before");
    }

    #[test]
    fn multi_part_candidate_must_match_on_every_part() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let mixed = tree.append(root, Rule::new("a:hover, b:hover"));
        let _m1 = tree.append(mixed, Decl::new("color", "green"));

        nest_pseudos(&mut tree, root).unwrap();

        // "b:hover" does not extend "a"; the candidate stays put.
        assert_eq!(tree.child_rules(root), vec![a, mixed]);
        assert!(tree.child_rules(a).is_empty());
    }

    #[test]
    fn multi_part_candidate_all_matching_is_absorbed() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let both = tree.append(root, Rule::new("a:hover, a:focus"));
        let _b1 = tree.append(both, Decl::new("color", "green"));

        nest_pseudos(&mut tree, root).unwrap();

        assert!(!tree.contains(both));
        let nested = tree.child_rules(a);
        assert_eq!(selector(&tree, nested[0]), "&:hover, &:focus");
    }

    #[test]
    fn non_pseudo_sibling_is_ignored() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let compound = tree.append(root, Rule::new("a.primary"));
        let _c1 = tree.append(compound, Decl::new("color", "green"));

        nest_pseudos(&mut tree, root).unwrap();

        assert_eq!(tree.child_rules(root), vec![a, compound]);
    }

    #[test]
    fn absorbed_rule_is_not_reused_as_base() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let hover = tree.append(root, Rule::new("a:hover"));
        let _h1 = tree.append(hover, Decl::new("color", "green"));
        let focus = tree.append(root, Rule::new("a:hover:focus"));
        let _f1 = tree.append(focus, Decl::new("color", "red"));

        nest_pseudos(&mut tree, root).unwrap();

        // Both pseudo rules extend "a"; both land under it exactly once.
        assert_eq!(tree.child_rules(root), vec![a]);
        let nested = tree.child_rules(a);
        assert_eq!(nested.len(), 2);
        assert_eq!(selector(&tree, nested[0]), "&:hover");
        assert_eq!(selector(&tree, nested[1]), "&:hover:focus");
    }

    #[test]
    fn candidate_with_conditional_block_is_left_alone() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let hover = tree.append(root, Rule::new("a:hover"));
        let _h1 = tree.append(hover, Decl::new("color", "green"));
        let media = tree.append(hover, AtRule::new("media", "(hover: hover)"));
        let tip = tree.append(media, Rule::new(".tip"));
        let _t1 = tree.append(tip, Decl::new("opacity", "1"));

        nest_pseudos(&mut tree, root).unwrap();

        // a:hover's only structure is an @media block; absorption would
        // destroy it, so the rule stays put.
        assert_eq!(tree.child_rules(root), vec![a, hover]);
        assert!(tree.child_rules(a).is_empty());
        assert_eq!(decl_keys(&tree, tip), vec!["opacity:1"]);
    }

    #[test]
    fn candidate_with_nested_rules_is_left_alone() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let a = tree.append(root, Rule::new("a"));
        let _a1 = tree.append(a, Decl::new("color", "blue"));
        let hover = tree.append(root, Rule::new("a:hover"));
        let _inner = tree.append(hover, Rule::new(".tooltip"));

        nest_pseudos(&mut tree, root).unwrap();

        assert_eq!(tree.child_rules(root), vec![a, hover]);
    }

    #[test]
    fn base_with_multi_part_selector_matches_each_part() {
        let mut tree = RuleTree::new();
        let root = tree.root();
        let base = tree.append(root, Rule::new("a, b"));
        let _base1 = tree.append(base, Decl::new("color", "blue"));
        let hover = tree.append(root, Rule::new("b:hover"));
        let _h1 = tree.append(hover, Decl::new("color", "green"));

        nest_pseudos(&mut tree, root).unwrap();

        // "b:hover" extends the base's second part.
        assert!(!tree.contains(hover));
        let nested = tree.child_rules(base);
        assert_eq!(selector(&tree, nested[0]), "&:hover");
    }
}
