//! conflicting-directives
//!
//! A file cannot be both a client and a server module: `"use client"` and
//! `"use server"` as file-level directives are mutually exclusive. The fix
//! removes the later of the two, on the assumption that the first directive
//! states the file's intent.

use engine::{
    FileContext, Fix, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta,
    RuleVisitor, Severity,
};
use oxc_span::Span;
use tree::{NodeId, NodeKind, NodeType};

use crate::utils::expand_through_line_end;

/// conflicting-directives rule
#[derive(Debug, Clone, Default)]
pub struct ConflictingDirectives;

static META: RuleMeta = RuleMeta {
    id: "conflicting-directives",
    description: "disallow mixing `use client` and `use server` in one file",
    category: RuleCategory::Correctness,
    fixable: true,
    messages: &[(
        "conflict",
        "Cannot mix the `use client` and `use server` directives in the same file.",
    )],
};

impl ConflictingDirectives {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ConflictingDirectives {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        Box::new(Visitor {
            file_directives: Vec::new(),
        })
    }
}

struct Visitor {
    /// File-level directives in source order
    file_directives: Vec<(String, Span)>,
}

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![
            Registration::enter(NodeType::Directive),
            Registration::exit(NodeType::Program),
        ]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        // Directives inside function bodies are a different concern.
        let file_level = ctx
            .parent(node)
            .is_some_and(|parent| ctx.tree().node_type(parent) == NodeType::Program);
        if !file_level {
            return;
        }
        if let NodeKind::Directive { value } = ctx.kind(node) {
            self.file_directives.push((value.clone(), ctx.span(node)));
        }
    }

    fn exit(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let client = self
            .file_directives
            .iter()
            .find(|(value, _)| value == "use client");
        let server = self
            .file_directives
            .iter()
            .find(|(value, _)| value == "use server");

        if let (Some((_, client_span)), Some((_, server_span))) = (client, server) {
            let later = if client_span.start > server_span.start {
                *client_span
            } else {
                *server_span
            };
            let removal = expand_through_line_end(ctx.source_text(), later);
            ctx.report(
                Report::new("conflict", ctx.span(node))
                    .with_severity(Severity::Error)
                    .with_help("Split client and server code into separate files.")
                    .with_fix(Fix::delete(removal).with_message("Remove the later directive")),
            );
        }
    }
}
