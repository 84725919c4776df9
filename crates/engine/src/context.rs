//! Contexts handed to rules: per-file setup and per-node traversal

use oxc_span::Span;
use serde_json::Value;
use tree::{NodeId, NodeKind, Tree};

use crate::diagnostic::{DiagnosticCollector, Report};
use crate::rule::RuleMeta;

/// What a rule factory sees when it is instantiated for a file.
pub struct FileContext<'a> {
    pub file_name: &'a str,
    pub source_text: &'a str,
    /// Rule options as configured by the caller; `Value::Null` when unset.
    pub options: &'a Value,
}

impl FileContext<'_> {
    /// Deserialize the options into a rule's own options struct, falling
    /// back to defaults when unset or malformed. Malformed options are a
    /// configuration bug, not a lint finding, so they degrade silently to
    /// defaults rather than crashing the run.
    pub fn parse_options<T>(&self) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.options.is_null() {
            return T::default();
        }
        serde_json::from_value(self.options.clone()).unwrap_or_default()
    }
}

/// Read access to the tree and ancestor stack plus the reporting capability,
/// scoped to one handler invocation.
pub struct RuleContext<'a> {
    pub(crate) meta: &'static RuleMeta,
    pub(crate) tree: &'a Tree,
    pub(crate) source_text: &'a str,
    pub(crate) file_name: &'a str,
    /// Path from the root to the current node, current node last.
    pub(crate) stack: &'a [NodeId],
    pub(crate) collector: &'a mut DiagnosticCollector,
}

impl<'a> RuleContext<'a> {
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn source_text(&self) -> &'a str {
        self.source_text
    }

    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    pub fn kind(&self, id: NodeId) -> &'a NodeKind {
        self.tree.kind(id)
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.tree.span(id)
    }

    /// Source text covered by a node
    pub fn node_text(&self, id: NodeId) -> &'a str {
        self.tree.text_of(id, self.source_text)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Ancestors of the current node, innermost last, current node excluded.
    pub fn ancestors(&self) -> &'a [NodeId] {
        &self.stack[..self.stack.len().saturating_sub(1)]
    }

    /// Report a diagnostic for this rule. The message key must exist in the
    /// rule's catalogue.
    pub fn report(&mut self, report: Report) {
        self.collector.report(self.meta.id, self.meta.messages, report);
    }
}
