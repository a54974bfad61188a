//! Source transforms for fluent query-builder code.
//!
//! Each transform is one rewrite rule over a parsed unit: it takes a
//! [`SourceUnit`], inspects a fresh syntax-tree snapshot, and applies text
//! edits. The centerpiece is [`UnrollIfChains`], which rewrites chains
//! carrying a conditional combinator into imperative `if` blocks; the other
//! transforms are cosmetic pattern substitutions (import paths, identifier
//! casing, error-constructor shapes).
//!
//! Transforms never write to disk; the CLI decides whether a modified unit
//! is persisted.

pub mod chain;

mod casing;
mod error;
mod errors_shape;
mod imports;
mod unused;

pub use casing::CamelCaseIdentifiers;
pub use chain::{ChainConfig, UnrollIfChains};
pub use error::{ChainError, Result, TransformError};
pub use errors_shape::{ErrorMessageContext, ErrorObjectToArgs};
pub use imports::{RelativeJsExtension, TildeImports};
pub use unused::StripUnusedImport;

use chisel_morph::SourceUnit;

/// One rewrite rule applied to one unit at a time.
pub trait Transform {
    /// Stable kebab-case name used to select the transform from the CLI.
    fn name(&self) -> &'static str;

    /// One-line summary for listings.
    fn description(&self) -> &'static str;

    /// Run the transform against a unit, mutating its text in place.
    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome>;
}

/// Result of applying a transform to one unit.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Whether the unit's text changed.
    pub modified: bool,
    /// Human-readable change notes (e.g. `- old` / `+ new` diff lines) for
    /// the CLI to display.
    pub notes: Vec<String>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }
}

/// All transforms with their default configuration, listing order.
pub fn registry() -> Vec<Box<dyn Transform>> {
    vec![
        Box::new(UnrollIfChains::default()),
        Box::new(RelativeJsExtension),
        Box::new(TildeImports::default()),
        Box::new(CamelCaseIdentifiers),
        Box::new(ErrorObjectToArgs),
        Box::new(ErrorMessageContext),
        Box::new(StripUnusedImport::default()),
    ]
}
