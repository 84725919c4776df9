//! Lowering from the oxc AST to the generic lint tree
//!
//! Only the constructs rules inspect get their own node kind; everything
//! else is walked through, so descendants of an unmodeled construct attach
//! to the nearest modeled ancestor. oxc spans nest, which preserves the
//! tree's containment invariant.

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingPattern, BlockStatement, CallExpression, Directive,
    ExpressionStatement, Function, FunctionBody, IdentifierReference, ImportDeclaration,
    ImportDeclarationSpecifier, JSXElement, JSXElementName, JSXFragment, NumericLiteral, Program,
    ReturnStatement, StaticMemberExpression, StringLiteral, TemplateLiteral, VariableDeclarator,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use tree::{NodeId, NodeKind, Tree, TreeBuilder};

/// Lower a parsed program into the generic tree.
pub fn lower_program(program: &Program<'_>, source: &str) -> Tree {
    let mut lowering = Lowering {
        builder: TreeBuilder::new(),
        stack: Vec::new(),
        source_len: source.len() as u32,
    };
    lowering.visit_program(program);
    lowering.builder.build()
}

struct Lowering {
    builder: TreeBuilder,
    stack: Vec<NodeId>,
    source_len: u32,
}

impl Lowering {
    fn begin(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = match self.stack.last() {
            Some(&parent) => self.builder.add_child(parent, kind, span),
            None => self.builder.add_root(kind, span),
        };
        self.stack.push(id);
        id
    }

    fn finish(&mut self) {
        self.stack.pop();
    }

    fn leaf(&mut self, kind: NodeKind, span: Span) {
        if let Some(&parent) = self.stack.last() {
            self.builder.add_child(parent, kind, span);
        }
    }
}

impl<'a> Visit<'a> for Lowering {
    fn visit_program(&mut self, program: &Program<'a>) {
        // The program span covers the whole file so that fixes anchored at
        // offset 0 or at EOF stay inside the root.
        let span = Span::new(0, self.source_len.max(program.span.end));
        self.begin(NodeKind::Program, span);
        walk::walk_program(self, program);
        self.finish();
    }

    fn visit_directive(&mut self, directive: &Directive<'a>) {
        self.leaf(
            NodeKind::Directive {
                value: directive.directive.to_string(),
            },
            directive.span,
        );
    }

    fn visit_expression_statement(&mut self, stmt: &ExpressionStatement<'a>) {
        self.begin(NodeKind::ExpressionStatement, stmt.span);
        walk::walk_expression_statement(self, stmt);
        self.finish();
    }

    fn visit_block_statement(&mut self, block: &BlockStatement<'a>) {
        self.begin(NodeKind::Block, block.span);
        walk::walk_block_statement(self, block);
        self.finish();
    }

    fn visit_function_body(&mut self, body: &FunctionBody<'a>) {
        // Function bodies carry their own directives ("use server" actions),
        // so they get a Block node just like explicit blocks.
        self.begin(NodeKind::Block, body.span);
        walk::walk_function_body(self, body);
        self.finish();
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.leaf(
            NodeKind::Identifier {
                name: ident.name.to_string(),
            },
            ident.span,
        );
    }

    fn visit_string_literal(&mut self, literal: &StringLiteral<'a>) {
        self.leaf(
            NodeKind::StringLiteral {
                value: literal.value.to_string(),
            },
            literal.span,
        );
    }

    fn visit_numeric_literal(&mut self, literal: &NumericLiteral<'a>) {
        self.leaf(NodeKind::NumberLiteral, literal.span);
    }

    fn visit_template_literal(&mut self, literal: &TemplateLiteral<'a>) {
        self.begin(NodeKind::TemplateLiteral, literal.span);
        walk::walk_template_literal(self, literal);
        self.finish();
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        self.begin(NodeKind::Call, call.span);
        walk::walk_call_expression(self, call);
        self.finish();
    }

    fn visit_static_member_expression(&mut self, member: &StaticMemberExpression<'a>) {
        self.begin(
            NodeKind::Member {
                property: member.property.name.to_string(),
            },
            member.span,
        );
        walk::walk_static_member_expression(self, member);
        self.finish();
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: oxc_syntax::scope::ScopeFlags) {
        self.begin(
            NodeKind::Function {
                name: func.id.as_ref().map(|id| id.name.to_string()),
                is_arrow: false,
                is_async: func.r#async,
            },
            func.span,
        );
        walk::walk_function(self, func, flags);
        self.finish();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        self.begin(
            NodeKind::Function {
                name: None,
                is_arrow: true,
                is_async: arrow.r#async,
            },
            arrow.span,
        );
        walk::walk_arrow_function_expression(self, arrow);
        self.finish();
    }

    fn visit_import_declaration(&mut self, import: &ImportDeclaration<'a>) {
        self.begin(
            NodeKind::Import {
                source: import.source.value.to_string(),
            },
            import.span,
        );
        if let Some(specifiers) = &import.specifiers {
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(named) => {
                        self.leaf(
                            NodeKind::ImportSpecifier {
                                imported: named.imported.name().to_string(),
                                local: named.local.name.to_string(),
                                default_import: false,
                            },
                            named.span,
                        );
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                        self.leaf(
                            NodeKind::ImportSpecifier {
                                imported: default.local.name.to_string(),
                                local: default.local.name.to_string(),
                                default_import: true,
                            },
                            default.span,
                        );
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                        self.leaf(
                            NodeKind::ImportSpecifier {
                                imported: "*".to_string(),
                                local: namespace.local.name.to_string(),
                                default_import: false,
                            },
                            namespace.span,
                        );
                    }
                }
            }
        }
        // Specifiers and the source literal are fully captured above.
        self.finish();
    }

    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator<'a>) {
        let name = match &declarator.id {
            BindingPattern::BindingIdentifier(ident) => Some(ident.name.to_string()),
            _ => None,
        };
        self.begin(NodeKind::VariableDeclarator { name }, declarator.span);
        walk::walk_variable_declarator(self, declarator);
        self.finish();
    }

    fn visit_return_statement(&mut self, stmt: &ReturnStatement<'a>) {
        self.begin(NodeKind::Return, stmt.span);
        walk::walk_return_statement(self, stmt);
        self.finish();
    }

    fn visit_jsx_element(&mut self, element: &JSXElement<'a>) {
        let name = match &element.opening_element.name {
            JSXElementName::Identifier(ident) => Some(ident.name.to_string()),
            JSXElementName::IdentifierReference(ident) => Some(ident.name.to_string()),
            _ => None,
        };
        self.begin(NodeKind::JsxElement { name }, element.span);
        walk::walk_jsx_element(self, element);
        self.finish();
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) {
        self.begin(NodeKind::JsxElement { name: None }, fragment.span);
        walk::walk_jsx_fragment(self, fragment);
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree::NodeType;

    fn parse(source: &str) -> Tree {
        crate::parse(source, "test.tsx").unwrap()
    }

    fn find_first(tree: &Tree, node_type: NodeType) -> Option<NodeId> {
        tree.descendants(tree.root())
            .find(|&id| tree.node_type(id) == node_type)
    }

    #[test]
    fn test_directive_lowering() {
        let tree = parse(r#""use client";"#);
        let directive = find_first(&tree, NodeType::Directive).expect("directive node");
        assert_eq!(
            tree.kind(directive),
            &NodeKind::Directive {
                value: "use client".to_string()
            }
        );
        assert_eq!(tree.parent(directive), Some(tree.root()));
    }

    #[test]
    fn test_function_body_directive_is_not_file_level() {
        let tree = parse("async function save() { \"use server\"; }");
        let directive = find_first(&tree, NodeType::Directive).expect("directive node");
        let parent = tree.parent(directive).unwrap();
        assert_eq!(tree.node_type(parent), NodeType::Block);
    }

    #[test]
    fn test_member_call_chain() {
        let source = "Math.random();";
        let tree = parse(source);
        let call = find_first(&tree, NodeType::Call).expect("call node");
        let member = tree.children(call)[0];
        assert_eq!(
            tree.kind(member),
            &NodeKind::Member {
                property: "random".to_string()
            }
        );
        let object = tree.children(member)[0];
        assert_eq!(
            tree.kind(object),
            &NodeKind::Identifier {
                name: "Math".to_string()
            }
        );
        assert_eq!(tree.text_of(member, source), "Math.random");
    }

    #[test]
    fn test_import_specifiers() {
        let tree = parse(r#"import React, { useState } from "react";"#);
        let import = find_first(&tree, NodeType::Import).expect("import node");
        assert_eq!(
            tree.kind(import),
            &NodeKind::Import {
                source: "react".to_string()
            }
        );
        let specifiers: Vec<_> = tree
            .children(import)
            .iter()
            .map(|&id| tree.kind(id).clone())
            .collect();
        assert_eq!(
            specifiers,
            vec![
                NodeKind::ImportSpecifier {
                    imported: "React".to_string(),
                    local: "React".to_string(),
                    default_import: true,
                },
                NodeKind::ImportSpecifier {
                    imported: "useState".to_string(),
                    local: "useState".to_string(),
                    default_import: false,
                },
            ]
        );
    }

    #[test]
    fn test_function_kinds() {
        let tree = parse("function Widget() {} const go = async () => {};");
        let functions: Vec<_> = tree
            .descendants(tree.root())
            .filter(|&id| tree.node_type(id) == NodeType::Function)
            .map(|id| tree.kind(id).clone())
            .collect();
        assert_eq!(functions.len(), 2);
        assert_eq!(
            functions[0],
            NodeKind::Function {
                name: Some("Widget".to_string()),
                is_arrow: false,
                is_async: false,
            }
        );
        assert_eq!(
            functions[1],
            NodeKind::Function {
                name: None,
                is_arrow: true,
                is_async: true,
            }
        );
    }

    #[test]
    fn test_jsx_element_name() {
        let tree = parse("const App = () => <Widget />;");
        let jsx = find_first(&tree, NodeType::JsxElement).expect("jsx node");
        assert_eq!(
            tree.kind(jsx),
            &NodeKind::JsxElement {
                name: Some("Widget".to_string())
            }
        );
    }

    #[test]
    fn test_spans_nest() {
        let tree = parse("function App() { return items.map(x => x); }");
        for id in tree.descendants(tree.root()) {
            let span = tree.span(id);
            for &child in tree.children(id) {
                let child_span = tree.span(child);
                assert!(child_span.start >= span.start && child_span.end <= span.end);
            }
        }
    }
}
