//! Import-specifier rewriting: explicit `.js` extensions and `~/` aliases.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use chisel_morph::{EditSet, NodeId, NodeKind, SourceUnit, SyntaxTree};

use crate::error::Result;
use crate::{Outcome, Transform};

/// Rewrite relative import specifiers to carry an explicit `.js` extension,
/// as required by Node's ESM resolver:
///
/// ```text
/// import { DbError } from './util/error'   →   './util/error.js'
/// import { api } from '.'                  →   './index.js'
/// ```
pub struct RelativeJsExtension;

impl Transform for RelativeJsExtension {
    fn name(&self) -> &'static str {
        "relative-js-extension"
    }

    fn description(&self) -> &'static str {
        "append explicit .js extensions to relative import specifiers"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let tree = unit.parse()?;
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        for import in tree.nodes_of_kind(NodeKind::Import) {
            let Some(source) = tree.import_source(import) else {
                continue;
            };
            let Some(value) = tree.string_value(source) else {
                continue;
            };
            if !value.starts_with('.') {
                continue;
            }

            let normalized = normalize_relative(value);
            let rewritten = if normalized.ends_with(".js") {
                normalized
            } else {
                format!("{normalized}.js")
            };
            if rewritten != value {
                notes.push(format!("- {value}\n+ {rewritten}"));
                edits.replace(tree.span(source), requote(tree.text(source), &rewritten));
            }
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// Rewrite deep relative imports to a `~/` source-root alias, leaving
/// same-subtree imports relative:
///
/// ```text
/// import { DbError } from '../../util/error'   →   '~/util/error'
/// ```
///
/// Specifiers resolving outside the source root are skipped.
pub struct TildeImports {
    source_root: PathBuf,
}

impl TildeImports {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }
}

impl Default for TildeImports {
    fn default() -> Self {
        Self::new("src")
    }
}

impl Transform for TildeImports {
    fn name(&self) -> &'static str {
        "tilde-imports"
    }

    fn description(&self) -> &'static str {
        "normalize deep relative imports to the ~/ source-root alias"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let tree = unit.parse()?;
        let file_dir = unit
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        for import in tree.nodes_of_kind(NodeKind::Import) {
            let Some(source) = tree.import_source(import) else {
                continue;
            };
            let Some(raw) = tree.string_value(source) else {
                continue;
            };

            let target = if let Some(aliased) = raw.strip_prefix("~/") {
                self.source_root.join(aliased).clean()
            } else if raw.starts_with('.') {
                file_dir.join(raw).clean()
            } else {
                continue;
            };

            let Some(from_root) = relative_path(&self.source_root, &target) else {
                // Escapes the source root; leave it alone.
                continue;
            };

            let rewritten = match relative_path(&file_dir, &target) {
                // Same subtree: keep it relative.
                Some(from_file) => format!("./{}", path_text(&from_file)),
                None => format!("~/{}", path_text(&from_root)),
            };
            if rewritten != raw {
                notes.push(format!("- {raw}\n+ {rewritten}"));
                edits.replace(tree.span(source), requote(tree.text(source), &rewritten));
            }
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// Clean a relative specifier and restore its `./` shape; bare `.` means
/// the directory index.
fn normalize_relative(specifier: &str) -> String {
    let cleaned = path_text(&Path::new(specifier).clean());
    if cleaned == "." || cleaned.is_empty() {
        "./index".to_string()
    } else if cleaned.starts_with("../") {
        cleaned
    } else {
        format!("./{}", cleaned.trim_start_matches("./"))
    }
}

/// Descendant-relative path of `target` under `base`, or `None` when
/// `target` is not below `base`.
fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    let target = target.clean();
    let base = base.clean();
    let mut remaining = target.components();
    for component in base.components() {
        if remaining.next() != Some(component) {
            return None;
        }
    }
    let rest: PathBuf = remaining.collect();
    if rest.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }
    Some(rest)
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Wrap a new specifier in the quote style of the original literal text.
fn requote(original: &str, value: &str) -> String {
    let quote = original.chars().next().unwrap_or('\'');
    format!("{quote}{value}{quote}")
}
