//! no-random-in-component
//!
//! `Math.random()` in a component render path yields a different value on
//! every render, breaking memoization and server/client markup agreement.
//! Calls wrapped in `useMemo` are fine. Component detection is the shared
//! name/JSX heuristic, so helpers with lowercase names inside a component
//! are not flagged.

use engine::{
    FileContext, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta, RuleVisitor,
};
use tree::{NodeId, NodeType};

use crate::utils::{call_path, is_component_function};

/// no-random-in-component rule
#[derive(Debug, Clone, Default)]
pub struct NoRandomInComponent;

static META: RuleMeta = RuleMeta {
    id: "no-random-in-component",
    description: "disallow Math.random() in component render paths",
    category: RuleCategory::Correctness,
    fixable: false,
    messages: &[(
        "unstable",
        "`Math.random()` in a component render path produces a new value on every render.",
    )],
};

/// Memoization wrappers that make a random value render-stable
const MEMO_CALLEES: &[&str] = &["useMemo", "React.useMemo"];

impl NoRandomInComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoRandomInComponent {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        Box::new(Visitor)
    }
}

struct Visitor;

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![Registration::enter(NodeType::Call)]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let tree = ctx.tree();
        if call_path(tree, node).as_deref() != Some("Math.random") {
            return;
        }

        // Walk outward: a memo call before the nearest function suppresses
        // the report; the nearest function decides whether this is a render
        // path at all.
        for &ancestor in ctx.ancestors().iter().rev() {
            match tree.node_type(ancestor) {
                NodeType::Call => {
                    if let Some(path) = call_path(tree, ancestor) {
                        if MEMO_CALLEES.contains(&path.as_str()) {
                            return;
                        }
                    }
                }
                NodeType::Function => {
                    if is_component_function(tree, ancestor) {
                        ctx.report(
                            Report::new("unstable", ctx.span(node))
                                .with_help("Wrap the value in `useMemo` or move it out of render."),
                        );
                    }
                    return;
                }
                _ => {}
            }
        }
    }
}
