//! Linter: the configured rule set and the check / check-and-fix drivers

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde_json::Value;
use tree::Tree;

use crate::context::FileContext;
use crate::diagnostic::{Diagnostic, DiagnosticCollector};
use crate::fixer::apply_fixes;
use crate::registry::Registry;
use crate::rule::Rule;
use crate::traversal::{Slot, Walker};

/// Default pass budget for check-and-fix mode.
pub const DEFAULT_MAX_PASSES: u32 = 10;

/// An immutable `(rule, options)` set. Rule definitions are shared and
/// stateless; every file gets fresh rule instances, so one `Linter` can be
/// used from multiple threads as long as each file is processed by one.
#[derive(Default, Clone)]
pub struct Linter {
    rules: Vec<(Arc<dyn Rule>, Value)>,
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(self, rule: Arc<dyn Rule>) -> Self {
        self.with_rule_options(rule, Value::Null)
    }

    pub fn with_rule_options(mut self, rule: Arc<dyn Rule>, options: Value) -> Self {
        self.rules.push((rule, options));
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Check mode: one traversal, diagnostics in deterministic order.
    pub fn run(&self, tree: &Tree, source_text: &str, file_name: &str) -> LintResult {
        self.run_inner(tree, source_text, file_name, None)
            .expect("run without a cancellation flag always completes")
    }

    /// Check mode with a cooperative cancellation flag, checked at every
    /// node. Returns `None` when cancelled; partial diagnostics are
    /// discarded.
    pub fn run_cancellable(
        &self,
        tree: &Tree,
        source_text: &str,
        file_name: &str,
        cancel: &AtomicBool,
    ) -> Option<LintResult> {
        self.run_inner(tree, source_text, file_name, Some(cancel))
    }

    fn run_inner(
        &self,
        tree: &Tree,
        source_text: &str,
        file_name: &str,
        cancel: Option<&AtomicBool>,
    ) -> Option<LintResult> {
        // Fresh rule instances per file: the factory is the only place
        // per-file state may live.
        let mut slots: Vec<Slot> = Vec::with_capacity(self.rules.len());
        let mut registry = Registry::new();
        for (rule, options) in &self.rules {
            let file = FileContext {
                file_name,
                source_text,
                options,
            };
            let visitor = rule.create(&file);
            let slot_id = slots.len();
            for registration in visitor.registrations() {
                registry.register(slot_id, registration);
            }
            slots.push(Slot {
                meta: rule.meta(),
                visitor,
                poisoned: false,
            });
        }

        let mut collector = DiagnosticCollector::new();
        let walker = Walker::new(
            tree,
            source_text,
            file_name,
            &registry,
            &mut slots,
            &mut collector,
            cancel,
        );
        if !walker.run() {
            return None;
        }

        Some(LintResult {
            diagnostics: collector.into_sorted(),
        })
    }

    /// Check-and-fix mode: apply accepted fixes, re-parse, re-run, until a
    /// pass accepts nothing or the pass budget runs out. `parse` is the
    /// caller's reparse hook; its error is file-fatal and ends the loop.
    pub fn check_and_fix<E>(
        &self,
        source_text: &str,
        file_name: &str,
        max_passes: u32,
        parse: impl Fn(&str) -> Result<Tree, E>,
    ) -> Result<FixOutcome, E> {
        let mut code = source_text.to_string();
        let mut passes = 0u32;

        loop {
            let tree = parse(&code)?;
            let result = self.run(&tree, &code, file_name);

            let application = apply_fixes(&code, &result.diagnostics);
            if application.applied == 0 {
                return Ok(FixOutcome {
                    fully_fixed: !result.diagnostics.iter().any(Diagnostic::is_fixable),
                    diagnostics: result.diagnostics,
                    code,
                    passes,
                });
            }

            code = application.code;
            passes += 1;

            if passes >= max_passes {
                // Budget exhausted: report the state of the final text
                // rather than looping silently.
                let tree = parse(&code)?;
                let result = self.run(&tree, &code, file_name);
                return Ok(FixOutcome {
                    fully_fixed: !result.diagnostics.iter().any(Diagnostic::is_fixable),
                    diagnostics: result.diagnostics,
                    code,
                    passes,
                });
            }
        }
    }
}

/// Result of a check run
#[derive(Debug)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, crate::Severity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, crate::Severity::Error))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, crate::Severity::Warning))
            .count()
    }
}

/// Result of a check-and-fix run
#[derive(Debug)]
pub struct FixOutcome {
    /// Rewritten source after all applied passes
    pub code: String,
    /// Diagnostics remaining against the final text
    pub diagnostics: Vec<Diagnostic>,
    /// Number of passes that applied at least one fix
    pub passes: u32,
    /// False when fixable diagnostics survived the pass budget
    pub fully_fixed: bool,
}
