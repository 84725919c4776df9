//! handler-name-prefix
//!
//! A binding named `handleClick` that holds a number is a lie to the next
//! reader. Bindings whose names use a handler prefix must be assigned a
//! function. Name-based only, so it lives in the nursery.

use engine::{
    FileContext, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta, RuleVisitor,
};
use serde::Deserialize;
use tree::{NodeId, NodeKind, NodeType};

use crate::utils::contains_node_type;

/// handler-name-prefix rule
#[derive(Debug, Clone, Default)]
pub struct HandlerNamePrefix;

static META: RuleMeta = RuleMeta {
    id: "handler-name-prefix",
    description: "require handler-named bindings to hold functions",
    category: RuleCategory::Nursery,
    fixable: false,
    messages: &[(
        "notFunction",
        "`{name}` is named like an event handler but is not assigned a function.",
    )],
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HandlerNamePrefixOptions {
    pub prefixes: Vec<String>,
}

impl Default for HandlerNamePrefixOptions {
    fn default() -> Self {
        Self {
            prefixes: vec!["handle".to_string()],
        }
    }
}

impl HandlerNamePrefix {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for HandlerNamePrefix {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, file: &FileContext<'_>) -> Box<dyn RuleVisitor> {
        let options: HandlerNamePrefixOptions = file.parse_options();
        Box::new(Visitor { options })
    }
}

/// `handleClick` matches the prefix `handle`; `handler` does not, because
/// the character after the prefix must start a new camelCase word.
fn has_handler_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        name.strip_prefix(prefix.as_str())
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_uppercase())
    })
}

struct Visitor {
    options: HandlerNamePrefixOptions,
}

impl RuleVisitor for Visitor {
    fn registrations(&self) -> Vec<Registration> {
        vec![Registration::enter(NodeType::VariableDeclarator)]
    }

    fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        let NodeKind::VariableDeclarator { name: Some(name) } = ctx.kind(node) else {
            return;
        };
        if !has_handler_prefix(name, &self.options.prefixes) {
            return;
        }
        if contains_node_type(ctx.tree(), node, NodeType::Function) {
            return;
        }
        let name = name.clone();
        ctx.report(
            Report::new("notFunction", ctx.span(node))
                .with_data("name", name)
                .with_help("Rename the binding or assign it a function."),
        );
    }
}
