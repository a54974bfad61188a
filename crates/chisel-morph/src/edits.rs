//! Byte-range text edits applied in one back-to-front splice.
//!
//! Edits are collected against a single snapshot and applied together, so no
//! node handle is ever consulted after the source text has changed.

use oxc_span::Span;

use crate::error::{MorphError, Result};

/// One textual substitution: replace `start..end` with `replacement`.
#[derive(Debug, Clone)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
}

/// An ordered set of non-overlapping edits against one source text.
#[derive(Debug, Default)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Queue a replacement of the text covered by `span`.
    pub fn replace(&mut self, span: Span, replacement: impl Into<String>) {
        self.edits.push(Edit {
            start: span.start,
            end: span.end,
            replacement: replacement.into(),
        });
    }

    /// Queue a deletion of the text covered by `span`.
    pub fn delete(&mut self, span: Span) {
        self.replace(span, "");
    }

    /// Apply all edits to `source`, producing the rewritten text.
    ///
    /// Edits are sorted by start offset and spliced from the end of the text
    /// backwards, so earlier offsets stay valid throughout. Overlapping
    /// ranges are an error: they indicate two rewrites fighting over the
    /// same text.
    pub fn apply(mut self, source: &str) -> Result<String> {
        self.edits.sort_by_key(|edit| (edit.start, edit.end));

        for pair in self.edits.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(MorphError::OverlappingEdits {
                    first_start: pair[0].start,
                    first_end: pair[0].end,
                    second_start: pair[1].start,
                    second_end: pair[1].end,
                });
            }
        }

        let mut output = source.to_string();
        for edit in self.edits.iter().rev() {
            let start = edit.start as usize;
            let end = edit.end as usize;
            if end > output.len()
                || !output.is_char_boundary(start)
                || !output.is_char_boundary(end)
            {
                return Err(MorphError::InvalidEditRange {
                    start: edit.start,
                    end: edit.end,
                });
            }
            output.replace_range(start..end, &edit.replacement);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_out_of_order_edits() {
        let mut edits = EditSet::new();
        edits.replace(Span::new(8, 13), "there");
        edits.replace(Span::new(0, 5), "howdy");
        let output = edits.apply("hello , world").unwrap();
        assert_eq!(output, "howdy , there");
    }

    #[test]
    fn test_overlapping_edits_rejected() {
        let mut edits = EditSet::new();
        edits.replace(Span::new(0, 6), "a");
        edits.replace(Span::new(4, 10), "b");
        let error = edits.apply("0123456789").unwrap_err();
        assert!(matches!(error, MorphError::OverlappingEdits { .. }));
    }

    #[test]
    fn test_delete_and_insertion_length_change() {
        let mut edits = EditSet::new();
        edits.delete(Span::new(0, 4));
        edits.replace(Span::new(5, 10), "a much longer piece");
        let output = edits.apply("abcd-12345-tail").unwrap();
        assert_eq!(output, "-a much longer piece-tail");
    }
}
