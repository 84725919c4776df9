//! Built-in convention rules
//!
//! Each rule is a self-contained module: metadata, per-file visitor, and
//! tests against real parsed sources. Rules only see the generic tree and
//! the rule context, never the parser's AST.

pub mod conflicting_directives;
pub mod handler_name_prefix;
pub mod no_duplicate_directives;
pub mod no_random_in_component;
pub mod prefer_destructured_import;
pub mod require_directive;
pub mod utils;

// Re-export rule structs
pub use conflicting_directives::ConflictingDirectives;
pub use handler_name_prefix::HandlerNamePrefix;
pub use no_duplicate_directives::NoDuplicateDirectives;
pub use no_random_in_component::NoRandomInComponent;
pub use prefer_destructured_import::PreferDestructuredImport;
pub use require_directive::RequireDirective;

use engine::Rule;
use std::sync::Arc;

/// Every built-in rule except the nursery, ready to hand to a linter.
pub fn recommended_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(ConflictingDirectives),
        Arc::new(NoDuplicateDirectives),
        Arc::new(NoRandomInComponent),
        Arc::new(PreferDestructuredImport),
    ]
}

/// Every built-in rule, nursery included.
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(ConflictingDirectives),
        Arc::new(HandlerNamePrefix),
        Arc::new(NoDuplicateDirectives),
        Arc::new(NoRandomInComponent),
        Arc::new(PreferDestructuredImport),
        Arc::new(RequireDirective),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<&str> = all_rules().iter().map(|rule| rule.meta().id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_rules().len());
    }

    #[test]
    fn test_message_catalogues_are_nonempty() {
        for rule in all_rules() {
            assert!(
                !rule.meta().messages.is_empty(),
                "rule {} has no message catalogue",
                rule.meta().id
            );
        }
    }
}
