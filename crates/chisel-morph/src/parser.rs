//! Parser façade for reading TypeScript/JavaScript source into snapshots

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{MorphError, Result};
use crate::tree::SyntaxTree;

/// Parse options for reading source code
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source type (JavaScript, TypeScript, JSX, TSX)
    pub source_type: SourceType,
    /// Allow parsing errors (returns a snapshot of the partial AST)
    pub allow_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::ts(),
            allow_errors: false,
        }
    }
}

impl ParseOptions {
    /// Create parse options from a file path (auto-detects source type)
    pub fn from_path(path: &Path) -> Self {
        Self {
            source_type: SourceType::from_path(path).unwrap_or(SourceType::ts()),
            allow_errors: false,
        }
    }

    /// Create parse options for TypeScript
    pub fn typescript() -> Self {
        Self {
            source_type: SourceType::ts(),
            allow_errors: false,
        }
    }
}

/// Parse source text into an owned [`SyntaxTree`] snapshot.
///
/// The OXC allocator and borrowed AST live only for the duration of this
/// call; the returned snapshot owns everything it needs.
pub fn parse(path: &Path, source: &str, options: &ParseOptions) -> Result<SyntaxTree> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, options.source_type).parse();

    if !parsed.errors.is_empty() {
        if !options.allow_errors {
            let reason = parsed
                .errors
                .iter()
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(MorphError::ParseFailed {
                path: path.to_path_buf(),
                reason,
            });
        }
        tracing::debug!(
            path = %path.display(),
            errors = parsed.errors.len(),
            "indexing a partial tree"
        );
    }

    Ok(SyntaxTree::from_program(source, &parsed.program))
}
