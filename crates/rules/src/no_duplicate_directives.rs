//! no-duplicate-directives
//!
//! A repeated file-level directive is dead weight; every repeat after the
//! first occurrence is reported and removed by the fix.

use engine::{
    FileContext, Fix, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta,
    RuleVisitor,
};
use rustc_hash::FxHashSet;
use tree::{NodeId, NodeKind, NodeType};

use crate::utils::expand_through_line_end;

/// no-duplicate-directives rule
#[derive(Debug, Clone, Default)]
pub struct NoDuplicateDirectives;

static META: RuleMeta = RuleMeta {
    id: "no-duplicate-directives",
    description: "disallow repeating the same file-level directive",
    category: RuleCategory::Correctness,
    fixable: true,
    messages: &[("duplicate", "Duplicate `{directive}` directive.")],
};

impl NoDuplicateDirectives {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoDuplicateDirectives {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        Box::new(Visitor {
            seen: FxHashSet::default(),
        })
    }
}

struct Visitor {
    seen: FxHashSet<String>,
}

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![Registration::enter(NodeType::Directive)]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let file_level = ctx
            .parent(node)
            .is_some_and(|parent| ctx.tree().node_type(parent) == NodeType::Program);
        if !file_level {
            return;
        }
        if let NodeKind::Directive { value } = ctx.kind(node) {
            if !self.seen.insert(value.clone()) {
                let span = ctx.span(node);
                let removal = expand_through_line_end(ctx.source_text(), span);
                ctx.report(
                    Report::new("duplicate", span)
                        .with_data("directive", value.clone())
                        .with_fix(Fix::delete(removal).with_message("Remove the repeated directive")),
                );
            }
        }
    }
}
