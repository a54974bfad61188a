//! Drop a named import whose only whole-word occurrence is the import.

use regex::Regex;

use chisel_morph::{EditSet, NodeKind, SourceUnit, Span};

use crate::error::Result;
use crate::{Outcome, Transform};

/// Remove a named import specifier when the imported name appears exactly
/// once in the unit, i.e. the import itself:
///
/// ```text
/// import { DbError, messageWithContext } from './util/error.js'
///   →  import { DbError } from './util/error.js'
/// ```
pub struct StripUnusedImport {
    import_name: String,
}

impl StripUnusedImport {
    pub fn new(import_name: impl Into<String>) -> Self {
        Self {
            import_name: import_name.into(),
        }
    }
}

impl Default for StripUnusedImport {
    fn default() -> Self {
        Self::new("messageWithContext")
    }
}

impl Transform for StripUnusedImport {
    fn name(&self) -> &'static str {
        "strip-unused-import"
    }

    fn description(&self) -> &'static str {
        "remove a named import specifier whose only occurrence is the import itself"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let pattern = format!(r"\b{}\b", regex::escape(&self.import_name));
        let matcher = Regex::new(&pattern).expect("escaped identifier is a valid pattern");
        if matcher.find_iter(unit.text()).count() != 1 {
            return Ok(Outcome::unchanged());
        }

        let tree = unit.parse()?;
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        for import in tree.nodes_of_kind(NodeKind::Import) {
            for &specifier in tree.import_specifiers(import) {
                if tree.specifier_imported(specifier) != Some(self.import_name.as_str()) {
                    continue;
                }
                notes.push(tree.text(import).to_string());
                edits.delete(widen_over_separator(tree.source(), tree.span(specifier)));
            }
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// Grow a specifier span over its list separator: the following comma and
/// spacing when one exists, otherwise the preceding one.
fn widen_over_separator(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();
    let mut end = span.end as usize;
    let mut probe = end;
    while probe < bytes.len() && bytes[probe].is_ascii_whitespace() {
        probe += 1;
    }
    if probe < bytes.len() && bytes[probe] == b',' {
        probe += 1;
        while probe < bytes.len() && bytes[probe] == b' ' {
            probe += 1;
        }
        end = probe;
        return Span::new(span.start, end as u32);
    }

    let mut start = span.start as usize;
    let mut probe = start;
    while probe > 0 && bytes[probe - 1].is_ascii_whitespace() {
        probe -= 1;
    }
    if probe > 0 && bytes[probe - 1] == b',' {
        start = probe - 1;
    }
    Span::new(start as u32, end as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_named_import_is_removed() {
        let mut unit = SourceUnit::new(
            "src/server.ts",
            "import { DbError, messageWithContext } from './util/error.js'\n\nthrow new DbError('x')\n",
        );
        let outcome = StripUnusedImport::default().apply(&mut unit).unwrap();
        assert!(outcome.modified);
        assert_eq!(
            unit.text(),
            "import { DbError } from './util/error.js'\n\nthrow new DbError('x')\n"
        );
    }

    #[test]
    fn test_leading_specifier_takes_the_following_comma() {
        let mut unit = SourceUnit::new(
            "src/server.ts",
            "import { messageWithContext, DbError } from './util/error.js'\n",
        );
        StripUnusedImport::default().apply(&mut unit).unwrap();
        assert_eq!(
            unit.text(),
            "import { DbError } from './util/error.js'\n"
        );
    }

    #[test]
    fn test_used_import_is_kept() {
        let source =
            "import { messageWithContext } from './util/error.js'\n\nmessageWithContext('x', {})\n";
        let mut unit = SourceUnit::new("src/server.ts", source);
        let outcome = StripUnusedImport::default().apply(&mut unit).unwrap();
        assert!(!outcome.modified);
        assert_eq!(unit.text(), source);
    }
}
