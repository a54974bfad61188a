//! Tree query primitives for source-rewriting tools.
//!
//! This crate is the host layer the chisel transforms run on: it parses
//! TypeScript/JavaScript with the OXC toolchain, then snapshots the parsed
//! program into an owned arena with stable integer node ids, parent links
//! and document-order children. Transforms navigate the snapshot, collect
//! byte-range [`EditSet`] entries, and splice them back into the unit text
//! in one pass.
//!
//! Snapshots are cheap and per-pass: text mutation invalidates every node
//! id, so a unit is re-parsed before any further queries.
//!
//! # Example
//!
//! ```rust
//! use chisel_morph::{NodeKind, SourceUnit};
//!
//! let unit = SourceUnit::new("demo.ts", "db.selectFrom('block')");
//! let tree = unit.parse()?;
//! let calls = tree.nodes_of_kind(NodeKind::Call);
//! assert_eq!(calls.len(), 1);
//! assert_eq!(tree.text(calls[0]), "db.selectFrom('block')");
//! # Ok::<(), chisel_morph::MorphError>(())
//! ```

mod edits;
mod error;
mod parser;
mod tree;
mod unit;

pub use edits::{Edit, EditSet};
pub use error::{MorphError, Result};
pub use parser::{ParseOptions, parse};
pub use tree::{Ancestors, NodeId, NodeKind, SyntaxTree};
pub use unit::SourceUnit;

// Re-export the span type edits and callers share
pub use oxc_span::Span;
