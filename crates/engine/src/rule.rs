//! The contract a rule author implements

use tree::{NodeId, NodeType};

use crate::context::{FileContext, RuleContext};

/// Rule category, used for grouping in default rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that detect code that is likely to be incorrect
    Correctness,
    /// Rules that suggest improvements
    Pedantic,
    /// Rules that encourage best practices
    Style,
    /// Rules that may have false positives (experimental)
    Nursery,
}

/// Static metadata declared once per rule.
pub struct RuleMeta {
    /// Unique rule id, e.g. `no-random-in-component`
    pub id: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    /// Whether the rule ever attaches fixes to its diagnostics
    pub fixable: bool,
    /// Message catalogue: key to template with `{placeholder}` slots
    pub messages: &'static [(&'static str, &'static str)],
}

/// Traversal phase a handler fires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

/// What a registration matches. Combined selectors ("any of these kinds")
/// are expressed as multiple registrations, which keeps the registry a
/// plain map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every node
    Any,
    Kind(NodeType),
}

/// One (selector, phase) subscription by a rule visitor.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub selector: Selector,
    pub phase: Phase,
}

impl Registration {
    pub fn enter(node_type: NodeType) -> Self {
        Self {
            selector: Selector::Kind(node_type),
            phase: Phase::Enter,
        }
    }

    pub fn exit(node_type: NodeType) -> Self {
        Self {
            selector: Selector::Kind(node_type),
            phase: Phase::Exit,
        }
    }

    pub fn any_enter() -> Self {
        Self {
            selector: Selector::Any,
            phase: Phase::Enter,
        }
    }

    pub fn any_exit() -> Self {
        Self {
            selector: Selector::Any,
            phase: Phase::Exit,
        }
    }
}

/// A registered rule definition. Immutable after setup and shared across
/// files; all per-file state lives in the visitor returned by [`Rule::create`].
pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    /// Build a fresh visitor for one file. Called once per file so that no
    /// rule state can leak across files.
    fn create(&self, file: &FileContext<'_>) -> Box<dyn RuleVisitor>;
}

/// Per-file rule instance: declares what it wants to see and reacts to
/// nodes during the single traversal. Discarded after the run.
pub trait RuleVisitor {
    /// Subscriptions consumed by the registry before traversal starts.
    fn registrations(&self) -> Vec<Registration>;

    fn enter(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {}

    fn exit(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {}
}
