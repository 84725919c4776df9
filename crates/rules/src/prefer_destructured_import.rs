//! prefer-destructured-import
//!
//! `import React from "react"` plus `React.useState(...)` everywhere keeps
//! the whole namespace alive for the bundler. The fix rewrites the import to
//! named specifiers and strips the namespace prefix off every member access.
//! The rule bails when the default binding is used as a plain value, since
//! rewriting would change behavior there.

use engine::{
    FileContext, Fix, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta,
    RuleVisitor,
};
use oxc_span::Span;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use tree::{NodeId, NodeKind, NodeType};

/// prefer-destructured-import rule
#[derive(Debug, Clone, Default)]
pub struct PreferDestructuredImport;

static META: RuleMeta = RuleMeta {
    id: "prefer-destructured-import",
    description: "prefer named imports over a default namespace binding",
    category: RuleCategory::Style,
    fixable: true,
    messages: &[(
        "destructure",
        "Prefer named imports from `{module}` over the `{default_name}` namespace.",
    )],
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreferDestructuredImportOptions {
    pub module: String,
    pub default_name: String,
}

impl Default for PreferDestructuredImportOptions {
    fn default() -> Self {
        Self {
            module: "react".to_string(),
            default_name: "React".to_string(),
        }
    }
}

impl PreferDestructuredImport {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PreferDestructuredImport {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        let options: PreferDestructuredImportOptions = file.parse_options();
        Box::new(Visitor {
            options,
            import_span: None,
            has_default: false,
            existing_named: Vec::new(),
            members: Vec::new(),
            bail: false,
        })
    }
}

struct Visitor {
    options: PreferDestructuredImportOptions,
    /// Span of the import declaration for the configured module
    import_span: Option<Span>,
    has_default: bool,
    /// Named specifiers already on the import, as `(imported, local)`
    existing_named: Vec<(String, String)>,
    /// `(span, property)` for each direct `Default.prop` access
    members: Vec<(Span, String)>,
    bail: bool,
}

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![
            Registration::enter(NodeType::Import),
            Registration::enter(NodeType::Member),
            Registration::enter(NodeType::Identifier),
            Registration::exit(NodeType::Program),
        ]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let tree = ctx.tree();
        match tree.kind(node) {
            NodeKind::Import { source } if *source == self.options.module => {
                self.import_span = Some(ctx.span(node));
                for &specifier in tree.children(node) {
                    if let NodeKind::ImportSpecifier {
                        imported,
                        local,
                        default_import,
                    } = tree.kind(specifier)
                    {
                        if *default_import {
                            if *local == self.options.default_name {
                                self.has_default = true;
                            }
                        } else if imported != "*" {
                            self.existing_named.push((imported.clone(), local.clone()));
                        } else {
                            // A namespace import alongside the default is
                            // more than this rule wants to untangle.
                            self.bail = true;
                        }
                    }
                }
            }
            NodeKind::Member { property } => {
                let object = tree.children(node).first().copied();
                let is_default_object = object.is_some_and(|object| {
                    matches!(
                        tree.kind(object),
                        NodeKind::Identifier { name } if *name == self.options.default_name
                    )
                });
                if is_default_object {
                    self.members.push((ctx.span(node), property.clone()));
                }
            }
            NodeKind::Identifier { name } if *name == self.options.default_name => {
                // Fine as the object of a member access; any other use of
                // the binding makes the rewrite unsafe.
                let in_member_object = ctx.parent(node).is_some_and(|parent| {
                    tree.node_type(parent) == NodeType::Member
                        && tree.children(parent).first() == Some(&node)
                });
                if !in_member_object {
                    self.bail = true;
                }
            }
            _ => {}
        }
    }

    fn exit(&mut self, _node: NodeId, ctx: &mut RuleContext<'_>) {
        let Some(import_span) = self.import_span else {
            return;
        };
        if self.bail || !self.has_default || self.members.is_empty() {
            return;
        }

        let mut names: FxHashSet<String> = self
            .existing_named
            .iter()
            .map(|(imported, local)| {
                if imported == local {
                    imported.clone()
                } else {
                    format!("{} as {}", imported, local)
                }
            })
            .collect();
        names.extend(self.members.iter().map(|(_, property)| property.clone()));
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();

        let import_text = format!(
            "import {{ {} }} from \"{}\";",
            names.join(", "),
            self.options.module
        );
        let mut report = Report::new("destructure", import_span)
            .with_data("module", self.options.module.clone())
            .with_data("default_name", self.options.default_name.clone())
            .with_fix(Fix::new(import_span, import_text).with_message("Use named imports"));
        for (span, property) in &self.members {
            report = report.with_fix(Fix::new(*span, property.clone()));
        }
        ctx.report(report);
    }
}
