//! Diagnostic and fix types, plus the per-run collector

use oxc_span::Span;

/// Message key used for diagnostics the engine emits on behalf of a rule
/// that crashed or misused its message catalogue.
pub const INTERNAL_ERROR_KEY: &str = "internal-error";

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A single text edit: replace the span with `replacement`.
///
/// Offsets are UTF-8 byte positions into the text version the producing
/// pass ran against. An empty span is a pure insertion.
#[derive(Debug, Clone)]
pub struct Fix {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
    /// Description of what the fix does
    pub message: Option<String>,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            replacement: replacement.into(),
            message: None,
        }
    }

    /// Pure insertion at `offset`.
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::new(offset, offset), text)
    }

    /// Remove the span entirely.
    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Strict overlap: touching ranges and co-located insertions do not
    /// overlap.
    pub fn overlaps(&self, other: &Fix) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One reported issue, immutable once collected.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Id of the rule that produced this diagnostic
    pub rule: String,
    /// Key into the rule's message catalogue
    pub message_key: String,
    /// Rendered message with placeholders interpolated
    pub message: String,
    pub start: u32,
    pub end: u32,
    pub severity: Severity,
    pub help: Option<String>,
    /// Edits proposed by the rule; must be mutually non-overlapping
    pub fixes: Vec<Fix>,
}

impl Diagnostic {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn is_fixable(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// True for diagnostics the engine emitted about a rule, rather than
    /// findings the rule emitted about the source.
    pub fn is_internal(&self) -> bool {
        self.message_key == INTERNAL_ERROR_KEY
    }
}

/// A pending report built by a rule handler; the collector renders it into
/// a [`Diagnostic`] against the rule's message catalogue.
#[derive(Debug)]
pub struct Report {
    key: &'static str,
    span: Span,
    data: Vec<(&'static str, String)>,
    severity: Severity,
    help: Option<String>,
    fixes: Vec<Fix>,
}

impl Report {
    pub fn new(key: &'static str, span: Span) -> Self {
        Self {
            key,
            span,
            data: Vec::new(),
            severity: Severity::Warning,
            help: None,
            fixes: Vec::new(),
        }
    }

    /// Bind a `{name}` placeholder in the message template.
    pub fn with_data(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.data.push((name, value.into()));
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }
}

fn interpolate(template: &str, data: &[(&'static str, String)]) -> String {
    let mut message = template.to_string();
    for (name, value) in data {
        message = message.replace(&format!("{{{name}}}"), value);
    }
    message
}

/// Accumulates diagnostics during one traversal run.
///
/// Identical `(rule, range)` pairs are not deduplicated; a rule that
/// reports the same condition twice will show up twice. Known footgun,
/// rules own their own reporting discipline.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a rule's report against its message catalogue and collect it.
    /// An unknown message key becomes an internal-error diagnostic instead
    /// of a panic.
    pub fn report(
        &mut self,
        rule_id: &str,
        messages: &[(&'static str, &'static str)],
        report: Report,
    ) {
        let template = messages
            .iter()
            .find(|(key, _)| *key == report.key)
            .map(|(_, template)| *template);

        match template {
            Some(template) => {
                self.diagnostics.push(Diagnostic {
                    rule: rule_id.to_string(),
                    message_key: report.key.to_string(),
                    message: interpolate(template, &report.data),
                    start: report.span.start,
                    end: report.span.end,
                    severity: report.severity,
                    help: report.help,
                    fixes: report.fixes,
                });
            }
            None => {
                self.report_internal(
                    rule_id,
                    report.span,
                    format!("unknown message key `{}`", report.key),
                );
            }
        }
    }

    /// Record an engine-side failure attributed to a rule, e.g. a handler
    /// crash. Never fixable.
    pub fn report_internal(&mut self, rule_id: &str, span: Span, message: String) {
        self.diagnostics.push(Diagnostic {
            rule: rule_id.to_string(),
            message_key: INTERNAL_ERROR_KEY.to_string(),
            message,
            start: span.start,
            end: span.end,
            severity: Severity::Error,
            help: None,
            fixes: Vec::new(),
        });
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in deterministic order, independent of handler
    /// invocation order: `(start, end, rule, message key)`.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by(|a, b| {
            (a.start, a.end, &a.rule, &a.message_key)
                .cmp(&(b.start, b.end, &b.rule, &b.message_key))
        });
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: &[(&str, &str)] = &[
        ("plain", "something is wrong"),
        ("templated", "`{name}` is not allowed in `{place}`"),
    ];

    #[test]
    fn test_interpolation() {
        let mut collector = DiagnosticCollector::new();
        collector.report(
            "demo",
            MESSAGES,
            Report::new("templated", Span::new(3, 7))
                .with_data("name", "eval")
                .with_data("place", "render"),
        );
        let diagnostics = collector.into_sorted();
        assert_eq!(diagnostics[0].message, "`eval` is not allowed in `render`");
        assert_eq!(diagnostics[0].message_key, "templated");
    }

    #[test]
    fn test_unknown_key_becomes_internal_error() {
        let mut collector = DiagnosticCollector::new();
        collector.report("demo", MESSAGES, Report::new("missing", Span::new(0, 1)));
        let diagnostics = collector.into_sorted();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_internal());
        assert!(diagnostics[0].message.contains("missing"));
    }

    #[test]
    fn test_sorted_by_position_then_rule() {
        let mut collector = DiagnosticCollector::new();
        collector.report("zeta", MESSAGES, Report::new("plain", Span::new(5, 9)));
        collector.report("alpha", MESSAGES, Report::new("plain", Span::new(5, 9)));
        collector.report("omega", MESSAGES, Report::new("plain", Span::new(0, 2)));
        let diagnostics = collector.into_sorted();
        assert_eq!(diagnostics[0].rule, "omega");
        assert_eq!(diagnostics[1].rule, "alpha");
        assert_eq!(diagnostics[2].rule, "zeta");
    }

    #[test]
    fn test_duplicate_reports_are_kept() {
        let mut collector = DiagnosticCollector::new();
        collector.report("demo", MESSAGES, Report::new("plain", Span::new(1, 2)));
        collector.report("demo", MESSAGES, Report::new("plain", Span::new(1, 2)));
        assert_eq!(collector.into_sorted().len(), 2);
    }

    #[test]
    fn test_fix_overlap_semantics() {
        let a = Fix::new(Span::new(0, 4), "x");
        let b = Fix::new(Span::new(4, 8), "y");
        assert!(!a.overlaps(&b), "touching ranges do not overlap");

        let c = Fix::new(Span::new(2, 6), "z");
        assert!(a.overlaps(&c));

        let i1 = Fix::insert(3, "a");
        let i2 = Fix::insert(3, "b");
        assert!(!i1.overlaps(&i2), "co-located insertions do not overlap");
    }
}
