//! Error types for source transforms

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use chisel_morph::MorphError;

/// Per-chain failures of the conditional-chain rewrite.
///
/// Each of these aborts the rewrite of one chain; the rest of the unit is
/// still processed so a run reports every broken chain at once.
#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum ChainError {
    /// The chain's terminal method is not a recognized consumption step.
    /// Rewriting anyway would silently drop a required execution call.
    #[error("chain must end in one of: {allowed}; got: {method}")]
    #[diagnostic(code(chisel::chain::unsupported_sink))]
    UnsupportedSink { method: String, allowed: String },

    /// Sink extraction was handed something that is not a call expression.
    #[error("chain root is not a call expression")]
    #[diagnostic(code(chisel::chain::not_a_call))]
    NotACall,

    /// The outermost call is not a method invocation on an inner chain.
    #[error("chain does not end in a method call")]
    #[diagnostic(code(chisel::chain::not_a_method_call))]
    NotAMethodCall,

    /// A conditional callback has no nameable first parameter, so there is
    /// nothing to substitute the accumulator for.
    #[error("conditional callback has no nameable parameter")]
    #[diagnostic(code(chisel::chain::missing_callback_param))]
    MissingCallbackParam,

    /// A conditional combinator call with the wrong arity.
    #[error("conditional combinator takes (condition, callback); found {found} argument(s)")]
    #[diagnostic(code(chisel::chain::malformed_conditional))]
    MalformedConditional { found: usize },

    /// The chain root is not inside a variable, return, or expression
    /// statement.
    #[error("chain is not contained in a rewritable statement")]
    #[diagnostic(code(chisel::chain::no_enclosing_statement))]
    NoEnclosingStatement,
}

/// Errors that can occur while applying a transform to a unit
#[derive(Error, Debug, Diagnostic)]
pub enum TransformError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Morph(#[from] MorphError),

    /// One or more chains in a unit could not be rewritten. The unit is left
    /// unwritten; successfully rewritten chains in other units are not
    /// rolled back.
    #[error("{}: {count} chain(s) could not be rewritten: {summary}", .path.display(), count = .failures.len(), summary = summarize(.failures))]
    #[diagnostic(code(chisel::transform::chain_rewrite))]
    ChainRewrite {
        path: PathBuf,
        failures: Vec<ChainError>,
    },

    /// A pattern the transform recognizes partially but cannot reshape.
    #[error("{}: {message}", .path.display())]
    #[diagnostic(code(chisel::transform::unsupported_shape))]
    UnsupportedShape { path: PathBuf, message: String },
}

fn summarize(failures: &[ChainError]) -> String {
    failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
