//! Single-pass depth-first traversal with crash containment

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use tree::{NodeId, Tree};

use crate::context::RuleContext;
use crate::diagnostic::DiagnosticCollector;
use crate::registry::Registry;
use crate::rule::{Phase, RuleMeta, RuleVisitor};

/// One instantiated rule for the current file.
pub(crate) struct Slot {
    pub meta: &'static RuleMeta,
    pub visitor: Box<dyn RuleVisitor>,
    /// Set when the visitor panicked; the rule is skipped for the rest of
    /// the run so a broken rule reports once, not once per node.
    pub poisoned: bool,
}

pub(crate) struct Walker<'a> {
    tree: &'a Tree,
    source_text: &'a str,
    file_name: &'a str,
    registry: &'a Registry,
    slots: &'a mut [Slot],
    collector: &'a mut DiagnosticCollector,
    stack: Vec<NodeId>,
    cancel: Option<&'a AtomicBool>,
    cancelled: bool,
}

impl<'a> Walker<'a> {
    pub fn new(
        tree: &'a Tree,
        source_text: &'a str,
        file_name: &'a str,
        registry: &'a Registry,
        slots: &'a mut [Slot],
        collector: &'a mut DiagnosticCollector,
        cancel: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            tree,
            source_text,
            file_name,
            registry,
            slots,
            collector,
            stack: Vec::new(),
            cancel,
            cancelled: false,
        }
    }

    /// Walk the whole tree. Returns false if the run was cancelled, in
    /// which case partial diagnostics must be discarded by the caller.
    pub fn run(mut self) -> bool {
        self.visit(self.tree.root());
        !self.cancelled
    }

    fn visit(&mut self, node: NodeId) {
        if self.is_cancelled() {
            return;
        }

        self.stack.push(node);
        self.dispatch(node, Phase::Enter);

        for &child in self.tree.children(node) {
            if self.cancelled {
                break;
            }
            self.visit(child);
        }

        if !self.cancelled {
            self.dispatch(node, Phase::Exit);
        }
        self.stack.pop();
    }

    fn is_cancelled(&mut self) -> bool {
        if self.cancelled {
            return true;
        }
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
                return true;
            }
        }
        false
    }

    fn dispatch(&mut self, node: NodeId, phase: Phase) {
        let node_type = self.tree.node_type(node);
        for slot_id in self.registry.lookup(node_type, phase) {
            let slot = &mut self.slots[slot_id];
            if slot.poisoned {
                continue;
            }

            let mut ctx = RuleContext {
                meta: slot.meta,
                tree: self.tree,
                source_text: self.source_text,
                file_name: self.file_name,
                stack: &self.stack,
                collector: &mut *self.collector,
            };

            let visitor = &mut slot.visitor;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| match phase {
                Phase::Enter => visitor.enter(node, &mut ctx),
                Phase::Exit => visitor.exit(node, &mut ctx),
            }));

            if let Err(payload) = outcome {
                slot.poisoned = true;
                self.collector.report_internal(
                    slot.meta.id,
                    self.tree.span(node),
                    format!("rule crashed: {}", panic_message(payload.as_ref())),
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_span::Span;
    use tree::{NodeKind, NodeType, TreeBuilder};

    use crate::diagnostic::Report;
    use crate::rule::Registration;

    fn two_call_tree() -> Tree {
        let mut builder = TreeBuilder::new();
        let root = builder.add_root(NodeKind::Program, Span::new(0, 10));
        let outer = builder.add_child(root, NodeKind::Call, Span::new(0, 8));
        builder.add_child(outer, NodeKind::Call, Span::new(2, 6));
        builder.build()
    }

    struct OrderProbe {
        log: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
        label: &'static str,
    }

    impl RuleVisitor for OrderProbe {
        fn registrations(&self) -> Vec<Registration> {
            vec![
                Registration::enter(NodeType::Call),
                Registration::exit(NodeType::Call),
            ]
        }

        fn enter(&mut self, node: NodeId, _ctx: &mut RuleContext<'_>) {
            self.log
                .borrow_mut()
                .push(format!("{}-enter-{}", self.label, node.index()));
        }

        fn exit(&mut self, node: NodeId, _ctx: &mut RuleContext<'_>) {
            self.log
                .borrow_mut()
                .push(format!("{}-exit-{}", self.label, node.index()));
        }
    }

    static PROBE_META: RuleMeta = RuleMeta {
        id: "probe",
        description: "test probe",
        category: crate::rule::RuleCategory::Nursery,
        fixable: false,
        messages: &[("seen", "seen")],
    };

    fn walk_with(tree: &Tree, slots: &mut Vec<Slot>) -> Vec<crate::Diagnostic> {
        let mut registry = Registry::new();
        for (slot_id, slot) in slots.iter().enumerate() {
            for registration in slot.visitor.registrations() {
                registry.register(slot_id, registration);
            }
        }
        let mut collector = DiagnosticCollector::new();
        let walker = Walker::new(tree, "0123456789", "test.tsx", &registry, slots, &mut collector, None);
        assert!(walker.run());
        collector.into_sorted()
    }

    #[test]
    fn test_enter_exit_nesting() {
        let tree = two_call_tree();
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut slots = vec![Slot {
            meta: &PROBE_META,
            visitor: Box::new(OrderProbe {
                log: log.clone(),
                label: "a",
            }),
            poisoned: false,
        }];
        walk_with(&tree, &mut slots);
        assert_eq!(
            *log.borrow(),
            vec!["a-enter-1", "a-enter-2", "a-exit-2", "a-exit-1"]
        );
    }

    struct Panicking;

    impl RuleVisitor for Panicking {
        fn registrations(&self) -> Vec<Registration> {
            vec![Registration::enter(NodeType::Call)]
        }

        fn enter(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {
            panic!("boom");
        }
    }

    struct Counting;

    impl RuleVisitor for Counting {
        fn registrations(&self) -> Vec<Registration> {
            vec![Registration::enter(NodeType::Call)]
        }

        fn enter(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
            ctx.report(Report::new("seen", ctx.span(node)));
        }
    }

    static CRASH_META: RuleMeta = RuleMeta {
        id: "crash",
        description: "always panics",
        category: crate::rule::RuleCategory::Nursery,
        fixable: false,
        messages: &[],
    };

    #[test]
    fn test_crash_containment() {
        let tree = two_call_tree();
        let mut slots = vec![
            Slot {
                meta: &CRASH_META,
                visitor: Box::new(Panicking),
                poisoned: false,
            },
            Slot {
                meta: &PROBE_META,
                visitor: Box::new(Counting),
                poisoned: false,
            },
        ];
        let diagnostics = walk_with(&tree, &mut slots);

        // One internal error for the crashed rule, both calls still seen
        // by the healthy rule.
        let internal: Vec<_> = diagnostics.iter().filter(|d| d.is_internal()).collect();
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].rule, "crash");
        assert!(internal[0].message.contains("boom"));

        let seen = diagnostics.iter().filter(|d| d.rule == "probe").count();
        assert_eq!(seen, 2);
    }

    struct AncestorProbe {
        depths: std::rc::Rc<std::cell::RefCell<Vec<usize>>>,
    }

    impl RuleVisitor for AncestorProbe {
        fn registrations(&self) -> Vec<Registration> {
            vec![Registration::any_enter()]
        }

        fn enter(&mut self, _node: NodeId, ctx: &mut RuleContext<'_>) {
            self.depths.borrow_mut().push(ctx.ancestors().len());
        }
    }

    #[test]
    fn test_ancestor_stack_depth() {
        let tree = two_call_tree();
        let depths = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut slots = vec![Slot {
            meta: &PROBE_META,
            visitor: Box::new(AncestorProbe {
                depths: depths.clone(),
            }),
            poisoned: false,
        }];
        walk_with(&tree, &mut slots);
        assert_eq!(*depths.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancellation_discards_run() {
        let tree = two_call_tree();
        let mut slots = vec![Slot {
            meta: &PROBE_META,
            visitor: Box::new(Counting),
            poisoned: false,
        }];
        let mut registry = Registry::new();
        for registration in slots[0].visitor.registrations() {
            registry.register(0, registration);
        }
        let mut collector = DiagnosticCollector::new();
        let cancel = AtomicBool::new(true);
        let walker = Walker::new(
            &tree,
            "0123456789",
            "test.tsx",
            &registry,
            &mut slots,
            &mut collector,
            Some(&cancel),
        );
        assert!(!walker.run());
    }
}
