//! Error types for parsing and text mutation

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while parsing source text or applying edits
#[derive(Error, Debug, Diagnostic)]
pub enum MorphError {
    /// Source text could not be parsed
    #[error("failed to parse {}: {reason}", .path.display())]
    #[diagnostic(code(chisel::morph::parse_failed))]
    ParseFailed { path: PathBuf, reason: String },

    /// Two edits target overlapping byte ranges of the same unit
    #[error("overlapping edits: {first_start}..{first_end} and {second_start}..{second_end}")]
    #[diagnostic(code(chisel::morph::overlapping_edits))]
    OverlappingEdits {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },

    /// An edit range does not fall on a char boundary of the source
    #[error("edit range {start}..{end} is not valid for this source")]
    #[diagnostic(code(chisel::morph::invalid_edit_range))]
    InvalidEditRange { start: u32, end: u32 },

    /// I/O error while reading or writing a source unit
    #[error("I/O error on {}", .path.display())]
    #[diagnostic(code(chisel::morph::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for tree and edit operations
pub type Result<T> = std::result::Result<T, MorphError>;
