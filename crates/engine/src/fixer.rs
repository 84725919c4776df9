//! Patch applier: resolves fix conflicts across diagnostics and rewrites text
//!
//! A diagnostic's own edits must be mutually non-overlapping (the rule
//! author's contract). Across diagnostics the applier is the arbiter: fix
//! groups are considered in `(first edit start, rule id)` order and a group
//! is accepted only if none of its edits overlaps an already-accepted edit.
//! Skipped diagnostics stay reported and get another chance on the next
//! pass, after the accepted edits have been applied and the text re-parsed.

use crate::diagnostic::{Diagnostic, Fix};

/// Result of applying one pass worth of fixes.
#[derive(Debug)]
pub struct FixApplication {
    /// Rewritten source text
    pub code: String,
    /// Number of diagnostics whose fix group was applied
    pub applied: usize,
    /// Number of fixable diagnostics skipped due to a conflict
    pub skipped: usize,
}

/// Apply as many non-conflicting fix groups as possible in one rewrite.
///
/// All offsets are interpreted against `source`; accepted edits never
/// overlap, so the rewrite walks the original text once.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> FixApplication {
    // Candidate groups in deterministic order.
    let mut groups: Vec<&Diagnostic> = diagnostics.iter().filter(|d| d.is_fixable()).collect();
    groups.sort_by_key(|d| {
        let first = d.fixes.iter().map(|f| f.start).min().unwrap_or(d.start);
        (first, d.rule.clone(), d.start, d.end)
    });

    let mut accepted: Vec<&Fix> = Vec::new();
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for diagnostic in groups {
        let internally_sound = diagnostic
            .fixes
            .iter()
            .enumerate()
            .all(|(i, fix)| diagnostic.fixes[..i].iter().all(|other| !fix.overlaps(other)));
        let conflicts = !internally_sound
            || diagnostic
                .fixes
                .iter()
                .any(|fix| accepted.iter().any(|other| fix.overlaps(other)));

        if conflicts {
            skipped += 1;
        } else {
            accepted.extend(diagnostic.fixes.iter());
            applied += 1;
        }
    }

    let code = rewrite(source, &mut accepted);

    FixApplication {
        code,
        applied,
        skipped,
    }
}

/// Splice non-overlapping edits into `source` in one left-to-right walk.
fn rewrite(source: &str, edits: &mut Vec<&Fix>) -> String {
    edits.sort_by_key(|fix| (fix.start, fix.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for fix in edits.iter() {
        let start = fix.start as usize;
        let end = fix.end as usize;
        output.push_str(&source[cursor..start]);
        output.push_str(&fix.replacement);
        cursor = end;
    }
    output.push_str(&source[cursor..]);
    output
}
