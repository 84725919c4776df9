//! treelint
//!
//! A lint engine for source-order trees: parse a file, walk the tree once,
//! run every registered rule visitor against it, and optionally apply the
//! fixes the rules suggest until the code is clean.
//!
//! ## Usage
//!
//! ```rust
//! use treelint::check;
//!
//! let source = "\"use client\";\n\"use server\";\nexport const x = 1;";
//! let result = check(source, "app.tsx").unwrap();
//! assert!(result.has_errors());
//! ```

use std::sync::Arc;

pub use engine::{
    apply_fixes, Diagnostic, DiagnosticCollector, FileContext, Fix, FixApplication, FixOutcome,
    LintResult, Linter, Phase, Registration, Report, Rule, RuleCategory, RuleContext, RuleMeta,
    RuleVisitor, Selector, Severity, DEFAULT_MAX_PASSES,
};
pub use rules::{all_rules, recommended_rules};
pub use syntax::{parse, ParseError};
pub use tree::{NodeId, NodeKind, NodeType, Tree};

/// A linter loaded with the recommended rule set.
pub fn default_linter() -> Linter {
    let mut linter = Linter::new();
    for rule in recommended_rules() {
        linter = linter.with_rule(rule);
    }
    linter
}

/// Lint a source file with the recommended rules.
pub fn check(source: &str, file_name: &str) -> Result<LintResult, ParseError> {
    check_with_rules(source, file_name, recommended_rules())
}

/// Lint a source file with an explicit rule set.
pub fn check_with_rules(
    source: &str,
    file_name: &str,
    rules: Vec<Arc<dyn Rule>>,
) -> Result<LintResult, ParseError> {
    let mut linter = Linter::new();
    for rule in rules {
        linter = linter.with_rule(rule);
    }
    let tree = parse(source, file_name)?;
    Ok(linter.run(&tree, source, file_name))
}

/// Lint a source file with the recommended rules and apply fixes until the
/// code stops changing or the pass budget runs out.
pub fn check_and_fix(source: &str, file_name: &str) -> Result<FixOutcome, ParseError> {
    default_linter().check_and_fix(source, file_name, DEFAULT_MAX_PASSES, |text| {
        parse(text, file_name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_clean_file() {
        let result = check("export const x = 1;", "app.tsx").unwrap();
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_check_reports_conflict() {
        let source = "\"use client\";\n\"use server\";\nexport const x = 1;";
        let result = check(source, "app.tsx").unwrap();
        assert!(result.has_errors());
    }

    #[test]
    fn test_check_rejects_broken_source() {
        assert!(check("const = ;", "app.tsx").is_err());
    }

    #[test]
    fn test_check_and_fix_cleans_the_file() {
        let source = "\"use client\";\n\"use client\";\nexport const x = 1;";
        let outcome = check_and_fix(source, "app.tsx").unwrap();
        assert_eq!(outcome.code, "\"use client\";\nexport const x = 1;");
        assert!(outcome.fully_fixed);
    }

    #[test]
    fn test_explicit_rule_set() {
        let source = "const handleClick = 5;";
        let result = check_with_rules(
            source,
            "app.tsx",
            vec![Arc::new(rules::HandlerNamePrefix)],
        )
        .unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule, "handler-name-prefix");
    }
}
