//! Tree-rule execution engine
//!
//! The reusable substrate under a convention-lint rule set: a visitor
//! registry keyed by node kind and phase, a single-pass depth-first
//! traversal with crash containment, a deterministic diagnostic collector,
//! and a patch applier with a multi-pass fix driver. Rules implement
//! [`Rule`] and get a fresh [`RuleVisitor`] per file; parsing is someone
//! else's job (see the `syntax` crate for the oxc bridge).

mod context;
mod diagnostic;
mod fixer;
mod linter;
mod registry;
mod rule;
mod traversal;

pub use context::{FileContext, RuleContext};
pub use diagnostic::{
    Diagnostic, DiagnosticCollector, Fix, Report, Severity, INTERNAL_ERROR_KEY,
};
pub use fixer::{apply_fixes, FixApplication};
pub use linter::{FixOutcome, LintResult, Linter, DEFAULT_MAX_PASSES};
pub use rule::{Phase, Registration, Rule, RuleCategory, RuleMeta, RuleVisitor, Selector};
