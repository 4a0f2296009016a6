//! Node types: NodeId, NodeData, Source.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a tree node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Construction-context metadata carried by every non-root node.
///
/// Parsed nodes record where in the source text they came from; nodes
/// synthesized during a rewrite inherit the metadata of a reference node
/// (see [`crate::factory`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// 1-based line in the source text.
    pub line: u32,
    /// 1-based column in the source text.
    pub column: u32,
}

impl Source {
    /// Create a source position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A style rule: a selector list paired with child declarations and rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The comma-separated selector list, e.g. `".a, .b:hover"`.
    pub selector: String,
    /// Where this rule came from, if known.
    pub source: Option<Source>,
}

impl Rule {
    /// Create a rule with the given selector and no source position.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            source: None,
        }
    }

    /// Set the source position (builder).
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

/// A conditional block, e.g. a media-query-like wrapper.
///
/// The engine never interprets `name` or `params`; it only recurses through
/// the block's children.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The block keyword, e.g. `"media"`.
    pub name: String,
    /// The condition text, e.g. `"(max-width: 100px)"`.
    pub params: String,
    /// Where this block came from, if known.
    pub source: Option<Source>,
}

impl AtRule {
    /// Create a conditional block with the given keyword and condition text.
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            source: None,
        }
    }

    /// Set the source position (builder).
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

/// A property declaration, owned by exactly one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    /// The property name, e.g. `"color"`.
    pub prop: String,
    /// The value text, e.g. `"red"`.
    pub value: String,
    /// Where this declaration came from, if known.
    pub source: Option<Source>,
}

impl Decl {
    /// Create a declaration with the given property and value.
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            source: None,
        }
    }

    /// Set the source position (builder).
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// The `prop:value` key used to compare declarations across rules.
    ///
    /// Comparison is exact text: no whitespace or value normalization.
    pub fn key(&self) -> String {
        format!("{}:{}", self.prop, self.value)
    }
}

/// Data associated with a single tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// The stylesheet root. Exactly one per tree.
    Root,
    /// A style rule.
    Rule(Rule),
    /// A conditional block.
    AtRule(AtRule),
    /// A property declaration.
    Decl(Decl),
}

impl NodeData {
    /// Whether this node is a rule.
    pub fn is_rule(&self) -> bool {
        matches!(self, NodeData::Rule(_))
    }

    /// Whether this node is a conditional block.
    pub fn is_at_rule(&self) -> bool {
        matches!(self, NodeData::AtRule(_))
    }

    /// Whether this node is a declaration.
    pub fn is_decl(&self) -> bool {
        matches!(self, NodeData::Decl(_))
    }

    /// Whether this node can hold children (root, rule, or conditional block).
    pub fn is_container(&self) -> bool {
        !self.is_decl()
    }

    /// Borrow the rule payload, if this is a rule.
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            NodeData::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Mutably borrow the rule payload, if this is a rule.
    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            NodeData::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Borrow the declaration payload, if this is a declaration.
    pub fn as_decl(&self) -> Option<&Decl> {
        match self {
            NodeData::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    /// The source position carried by this node, if any.
    pub fn source(&self) -> Option<Source> {
        match self {
            NodeData::Root => None,
            NodeData::Rule(rule) => rule.source,
            NodeData::AtRule(at) => at.source,
            NodeData::Decl(decl) => decl.source,
        }
    }
}

impl From<Rule> for NodeData {
    fn from(rule: Rule) -> Self {
        NodeData::Rule(rule)
    }
}

impl From<AtRule> for NodeData {
    fn from(at: AtRule) -> Self {
        NodeData::AtRule(at)
    }
}

impl From<Decl> for NodeData {
    fn from(decl: Decl) -> Self {
        NodeData::Decl(decl)
    }
}
