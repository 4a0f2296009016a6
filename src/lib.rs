//! # nestcss
//!
//! An aggressive CSS nesting engine: the opposite of the usual un-nesting
//! transforms. Given an in-memory rule tree, nestcss merges sibling selectors
//! that share declarations, factors common properties into grouped rules,
//! converts descendant selectors into nested parent/child rules, and folds
//! pseudo-class/element rules into their base as `&`-prefixed nested rules.
//!
//! Parsing stylesheet text and printing the result are deliberately out of
//! scope: the engine consumes an already-built [`tree::RuleTree`] and mutates
//! it in place. It is a deterministic heuristic compactor, not an optimizer
//! with a proof of minimality, and it never interprets CSS semantics — no
//! specificity, no cascade, no value normalization.
//!
//! ## Core Systems
//!
//! - **[`tree`]** — Slotmap-backed rule tree: rules, declarations, conditional
//!   blocks, ordered children, queries
//! - **[`selector`]** — Lexical selector-list utilities and the pseudo
//!   extension check
//! - **[`factory`]** — Node synthesis with metadata inherited from reference
//!   nodes; the engine's only failure source
//! - **[`passes`]** — The four rewrite passes, structural cleanup, and the
//!   [`passes::nest`] orchestrator
//!
//! ## Example
//!
//! ```
//! use nestcss::passes::{nest, NestOptions};
//! use nestcss::tree::{Decl, Rule, RuleTree};
//!
//! let mut tree = RuleTree::new();
//! let root = tree.root();
//! let a = tree.append(root, Rule::new("a"));
//! tree.append(a, Decl::new("color", "blue"));
//! let hover = tree.append(root, Rule::new("a:hover"));
//! tree.append(hover, Decl::new("color", "green"));
//!
//! nest(&mut tree, &NestOptions::default()).unwrap();
//!
//! // a { color: blue; &:hover { color: green } }
//! let nested = tree.child_rules(a);
//! assert_eq!(tree.get(nested[0]).unwrap().as_rule().unwrap().selector, "&:hover");
//! ```

pub mod factory;
pub mod passes;
pub mod selector;
pub mod tree;

pub use factory::FactoryError;
pub use passes::{nest, NestOptions};
pub use tree::{AtRule, Decl, NodeData, NodeId, Rule, RuleTree, Source};
