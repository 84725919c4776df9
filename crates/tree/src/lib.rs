//! Parser-agnostic syntax tree for lint rules
//!
//! Rules never see the parser's own AST. They see this arena tree: every node
//! has a kind, a byte span into the source text, exclusively owned children,
//! and a weak back-reference to its parent expressed as an index. The tree is
//! read-only once built; fixes rewrite the source text, which is then
//! re-parsed into a fresh tree.

use oxc_span::Span;

/// Index of a node in a [`Tree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node kind with per-kind payload.
///
/// The catalogue covers what convention rules inspect: directives, calls and
/// member chains, functions, imports, and a catch-all [`NodeKind::Other`] for
/// constructs no rule cares about but whose descendants still matter.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program,
    /// A string-literal pragma at the top of a file or function body,
    /// e.g. `"use client"`. The value excludes the quotes.
    Directive { value: String },
    ExpressionStatement,
    Block,
    Identifier { name: String },
    StringLiteral { value: String },
    NumberLiteral,
    TemplateLiteral,
    Call,
    /// Static member access; `property` is the right-hand name, the object
    /// expression is the first child.
    Member { property: String },
    Function {
        name: Option<String>,
        is_arrow: bool,
        is_async: bool,
    },
    Import { source: String },
    ImportSpecifier {
        imported: String,
        local: String,
        default_import: bool,
    },
    VariableDeclarator { name: Option<String> },
    Return,
    JsxElement { name: Option<String> },
    Other,
}

/// Fieldless mirror of [`NodeKind`], used as the visitor-registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Program,
    Directive,
    ExpressionStatement,
    Block,
    Identifier,
    StringLiteral,
    NumberLiteral,
    TemplateLiteral,
    Call,
    Member,
    Function,
    Import,
    ImportSpecifier,
    VariableDeclarator,
    Return,
    JsxElement,
    Other,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Program => NodeType::Program,
            NodeKind::Directive { .. } => NodeType::Directive,
            NodeKind::ExpressionStatement => NodeType::ExpressionStatement,
            NodeKind::Block => NodeType::Block,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::StringLiteral { .. } => NodeType::StringLiteral,
            NodeKind::NumberLiteral => NodeType::NumberLiteral,
            NodeKind::TemplateLiteral => NodeType::TemplateLiteral,
            NodeKind::Call => NodeType::Call,
            NodeKind::Member { .. } => NodeType::Member,
            NodeKind::Function { .. } => NodeType::Function,
            NodeKind::Import { .. } => NodeType::Import,
            NodeKind::ImportSpecifier { .. } => NodeType::ImportSpecifier,
            NodeKind::VariableDeclarator { .. } => NodeType::VariableDeclarator,
            NodeKind::Return => NodeType::Return,
            NodeKind::JsxElement { .. } => NodeType::JsxElement,
            NodeKind::Other => NodeType::Other,
        }
    }
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable, single-rooted, acyclic syntax tree.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.nodes[id.index()].kind.node_type()
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Slice the source text covered by a node. O(length of the slice).
    pub fn text_of<'a>(&self, id: NodeId, source: &'a str) -> &'a str {
        let span = self.span(id);
        &source[span.start as usize..span.end as usize]
    }

    /// Pre-order iterator over `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }
}

/// Pre-order descendant iterator, children visited left to right.
pub struct Descendants<'t> {
    tree: &'t Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.tree.children(id);
        self.stack.extend(children.iter().rev());
        Some(id)
    }
}

/// Builder that enforces the tree invariants while a parser bridge lowers
/// its own AST into the generic shape.
///
/// Invariants checked (debug builds): every child span is contained in its
/// parent's span, and sibling spans are appended in non-overlapping source
/// order.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add the root node. Must be called exactly once, first.
    pub fn add_root(&mut self, kind: NodeKind, span: Span) -> NodeId {
        debug_assert!(self.nodes.is_empty(), "root must be the first node");
        self.nodes.push(NodeData {
            kind,
            span,
            parent: None,
            children: Vec::new(),
        });
        NodeId(0)
    }

    /// Add a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        {
            let parent_data = &self.nodes[parent.index()];
            debug_assert!(
                span.start >= parent_data.span.start && span.end <= parent_data.span.end,
                "child span {:?} escapes parent span {:?}",
                span,
                parent_data.span
            );
            if let Some(&prev) = parent_data.children.last() {
                debug_assert!(
                    self.nodes[prev.index()].span.end <= span.start,
                    "sibling span {:?} overlaps or precedes previous sibling {:?}",
                    span,
                    self.nodes[prev.index()].span
                );
            }
        }
        self.nodes.push(NodeData {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn build(self) -> Tree {
        debug_assert!(!self.nodes.is_empty(), "tree must have a root");
        Tree {
            nodes: self.nodes,
            root: NodeId(0),
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
