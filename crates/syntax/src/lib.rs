//! oxc parser bridge
//!
//! Parsing is delegated entirely to oxc; this crate turns source text into
//! the generic [`tree::Tree`] the engine traverses. A parse failure is
//! fatal for the file: no tree, no rules run.

mod lower;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;
use tree::Tree;

pub use lower::lower_program;

/// File-fatal parse failure.
#[derive(Debug, Error)]
#[error("failed to parse {file_name}: {message}")]
pub struct ParseError {
    pub file_name: String,
    pub message: String,
}

/// Parse `source` and lower it into the generic lint tree.
///
/// The source type is inferred from the file name, defaulting to TSX so
/// that plain snippets in tests and tools parse with the most permissive
/// grammar.
pub fn parse(source: &str, file_name: &str) -> Result<Tree, ParseError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_name).unwrap_or(SourceType::tsx());

    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|error| error.to_string())
            .unwrap_or_else(|| "parser gave up".to_string());
        return Err(ParseError {
            file_name: file_name.to_string(),
            message,
        });
    }

    Ok(lower_program(&ret.program, source))
}
