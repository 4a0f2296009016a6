//! Rewrite passes and the pipeline orchestrator.
//!
//! Four passes run in a fixed order — descendant nesting, sibling collapsing,
//! common-property factoring, pseudo nesting — followed by one unconditional
//! structural cleanup. Each pass is individually toggleable via
//! [`NestOptions`]; the ordering is not.

pub mod cleanup;
pub mod collapse;
pub mod descendants;
pub mod factor;
pub mod pseudos;

use crate::factory::FactoryError;
use crate::tree::RuleTree;

/// Which passes to run. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestOptions {
    /// Rewrite `.foo .bar { .. }` into `.foo { .bar { .. } }`.
    pub nest_descendants: bool,
    /// Merge sibling rules with identical declaration sets.
    pub collapse_nested_siblings: bool,
    /// Hoist `prop:value` pairs shared by two or more siblings.
    pub factor_common_props: bool,
    /// Fold `a:hover`-style rules into their base as `&:hover`.
    pub nest_pseudos: bool,
}

impl NestOptions {
    /// All passes enabled.
    pub fn new() -> Self {
        Self {
            nest_descendants: true,
            collapse_nested_siblings: true,
            factor_common_props: true,
            nest_pseudos: true,
        }
    }

    /// Toggle descendant nesting (builder).
    pub fn with_nest_descendants(mut self, enabled: bool) -> Self {
        self.nest_descendants = enabled;
        self
    }

    /// Toggle sibling collapsing (builder).
    pub fn with_collapse_nested_siblings(mut self, enabled: bool) -> Self {
        self.collapse_nested_siblings = enabled;
        self
    }

    /// Toggle common-property factoring (builder).
    pub fn with_factor_common_props(mut self, enabled: bool) -> Self {
        self.factor_common_props = enabled;
        self
    }

    /// Toggle pseudo nesting (builder).
    pub fn with_nest_pseudos(mut self, enabled: bool) -> Self {
        self.nest_pseudos = enabled;
        self
    }
}

impl Default for NestOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the full pipeline over the tree, in place.
///
/// Passes run in the fixed order descendants → collapse → factor → pseudos,
/// skipping any that `options` disables, then empty rules are pruned once
/// from the root down. A factory failure aborts the run immediately; the
/// tree may then hold a partially rewritten intermediate state, and the
/// caller decides whether to salvage or discard it.
pub fn nest(tree: &mut RuleTree, options: &NestOptions) -> Result<(), FactoryError> {
    let root = tree.root();
    if options.nest_descendants {
        descendants::nest_descendants(tree, root)?;
    }
    if options.collapse_nested_siblings {
        collapse::collapse_nested_siblings(tree, root)?;
    }
    if options.factor_common_props {
        factor::factor_common_props(tree, root)?;
    }
    if options.nest_pseudos {
        pseudos::nest_pseudos(tree, root)?;
    }
    cleanup::remove_empty_rules(tree, root);
    Ok(())
}
