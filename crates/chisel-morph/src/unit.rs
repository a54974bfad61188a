//! A single source file moving through a transform pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::edits::EditSet;
use crate::error::{MorphError, Result};
use crate::parser::{self, ParseOptions};
use crate::tree::SyntaxTree;

/// One source file: its path, its current text, and how to parse it.
///
/// Transforms parse a fresh [`SyntaxTree`] snapshot, queue edits against it,
/// and apply them back here. Writing the result to disk is the caller's
/// decision (dry runs never write).
pub struct SourceUnit {
    path: PathBuf,
    text: String,
    options: ParseOptions,
}

impl SourceUnit {
    /// Create a unit from in-memory text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let options = ParseOptions::from_path(&path);
        Self {
            path,
            text: text.into(),
            options,
        }
    }

    /// Read a unit from disk.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| MorphError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the current text into a snapshot.
    pub fn parse(&self) -> Result<SyntaxTree> {
        parser::parse(&self.path, &self.text, &self.options)
    }

    /// Apply an edit set to the current text. Returns whether anything
    /// changed. Snapshots taken before this call are stale afterwards.
    pub fn apply_edits(&mut self, edits: EditSet) -> Result<bool> {
        if edits.is_empty() {
            return Ok(false);
        }
        let rewritten = edits.apply(&self.text)?;
        let changed = rewritten != self.text;
        self.text = rewritten;
        Ok(changed)
    }

    /// Persist the current text back to the unit's path.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.text).map_err(|source| MorphError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
