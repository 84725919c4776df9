//! Shared predicate helpers for convention rules
//!
//! Name-based heuristics live here. They are best-effort by design:
//! syntactic linting cannot prove a function is a component or a callee is
//! really the global `Math`, only that it looks like one.

use oxc_span::Span;
use tree::{NodeId, NodeKind, NodeType, Tree};

/// Dotted path of a callee expression, e.g. `Math.random` or
/// `React.useMemo`. `None` for computed access, calls of calls, and other
/// shapes rules do not pattern-match on.
pub fn callee_path(tree: &Tree, callee: NodeId) -> Option<String> {
    match tree.kind(callee) {
        NodeKind::Identifier { name } => Some(name.clone()),
        NodeKind::Member { property } => {
            let object = *tree.children(callee).first()?;
            let mut path = callee_path(tree, object)?;
            path.push('.');
            path.push_str(property);
            Some(path)
        }
        _ => None,
    }
}

/// Dotted path of a call's callee, if the call has a simple one.
pub fn call_path(tree: &Tree, call: NodeId) -> Option<String> {
    let callee = *tree.children(call).first()?;
    callee_path(tree, callee)
}

/// PascalCase check used for component detection.
pub fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Whether any node of `node_type` occurs in the subtree rooted at `id`.
pub fn contains_node_type(tree: &Tree, id: NodeId, node_type: NodeType) -> bool {
    tree.descendants(id).any(|node| tree.node_type(node) == node_type)
}

/// Whether a function node looks like a component: PascalCase name,
/// PascalCase variable it is assigned to, or JSX in its body. Heuristic.
pub fn is_component_function(tree: &Tree, function: NodeId) -> bool {
    if let NodeKind::Function { name, .. } = tree.kind(function) {
        if let Some(name) = name {
            if is_pascal_case(name) {
                return true;
            }
        }
        if let Some(parent) = tree.parent(function) {
            if let NodeKind::VariableDeclarator { name: Some(name) } = tree.kind(parent) {
                if is_pascal_case(name) {
                    return true;
                }
            }
        }
        contains_node_type(tree, function, NodeType::JsxElement)
    } else {
        false
    }
}

/// Extend a statement span through its trailing semicolon, inline
/// whitespace, and one line break, so that deleting it does not leave a
/// blank line behind.
pub fn expand_through_line_end(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();
    let mut end = span.end as usize;
    while end < bytes.len() && matches!(bytes[end], b';' | b' ' | b'\t') {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\r' {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    }
    Span::new(span.start, end as u32)
}
