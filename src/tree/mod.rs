//! Rule tree: slotmap arena, node data, queries.

pub mod arena;
pub mod node;
pub mod query;

pub use arena::RuleTree;
pub use node::{AtRule, Decl, NodeData, NodeId, Rule, Source};
