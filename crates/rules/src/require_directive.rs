//! require-directive
//!
//! Some trees (app routers, worker bundles) expect every file to declare
//! its execution environment up front. This rule requires a configured
//! file-level directive and inserts it at the top when missing.

use engine::{
    FileContext, Fix, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta,
    RuleVisitor,
};
use oxc_span::Span;
use serde::Deserialize;
use tree::{NodeId, NodeKind, NodeType};

/// require-directive rule
#[derive(Debug, Clone, Default)]
pub struct RequireDirective;

static META: RuleMeta = RuleMeta {
    id: "require-directive",
    description: "require a configured file-level directive",
    category: RuleCategory::Style,
    fixable: true,
    messages: &[(
        "missing",
        "Expected the `{directive}` directive at the top of the file.",
    )],
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequireDirectiveOptions {
    pub directive: String,
}

impl Default for RequireDirectiveOptions {
    fn default() -> Self {
        Self {
            directive: "use client".to_string(),
        }
    }
}

impl RequireDirective {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RequireDirective {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        let options: RequireDirectiveOptions = file.parse_options();
        Box::new(Visitor {
            directive: options.directive,
            found: false,
        })
    }
}

struct Visitor {
    directive: String,
    found: bool,
}

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![
            Registration::enter(NodeType::Directive),
            Registration::exit(NodeType::Program),
        ]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let file_level = ctx
            .parent(node)
            .is_some_and(|parent| ctx.tree().node_type(parent) == NodeType::Program);
        if !file_level {
            return;
        }
        if let NodeKind::Directive { value } = ctx.kind(node) {
            if *value == self.directive {
                self.found = true;
            }
        }
    }

    fn exit(&mut self, _node: NodeId, ctx: &mut RuleContext<'_>) {
        if !self.found {
            ctx.report(
                Report::new("missing", Span::new(0, 0))
                    .with_data("directive", self.directive.clone())
                    .with_fix(
                        Fix::insert(0, format!("\"{}\";\n", self.directive))
                            .with_message("Insert the directive"),
                    ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Diagnostic, Linter, DEFAULT_MAX_PASSES};
    use serde_json::json;
    use std::sync::Arc;

    fn lint(source: &str) -> Vec<Diagnostic> {
        let tree = syntax::parse(source, "test.tsx").unwrap();
        Linter::new()
            .with_rule(Arc::new(RequireDirective))
            .run(&tree, source, "test.tsx")
            .diagnostics
    }

    #[test]
    fn test_present_directive() {
        assert!(lint("\"use client\";\nexport const x = 1;").is_empty());
    }

    #[test]
    fn test_missing_directive_reported_at_file_start() {
        let diagnostics = lint("export const x = 1;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].start, 0);
        assert_eq!(diagnostics[0].end, 0);
        assert!(diagnostics[0].message.contains("use client"));
    }

    #[test]
    fn test_fix_inserts_at_offset_zero() {
        let outcome = Linter::new()
            .with_rule(Arc::new(RequireDirective))
            .check_and_fix("export const x = 1;", "test.tsx", DEFAULT_MAX_PASSES, |text| {
                syntax::parse(text, "test.tsx")
            })
            .unwrap();
        assert_eq!(outcome.code, "\"use client\";\nexport const x = 1;");
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.passes, 1);
    }

    #[test]
    fn test_configured_directive() {
        let source = "\"use client\";\nlet a = 1;";
        let tree = syntax::parse(source, "test.tsx").unwrap();
        let diagnostics = Linter::new()
            .with_rule_options(
                Arc::new(RequireDirective),
                json!({ "directive": "use strict" }),
            )
            .run(&tree, source, "test.tsx")
            .diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("use strict"));
    }
}
