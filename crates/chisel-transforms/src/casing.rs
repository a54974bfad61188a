//! snake_case → camelCase renames for identifiers and matching literals.

use regex::Regex;

use chisel_morph::{EditSet, NodeKind, SourceUnit};

use crate::error::Result;
use crate::{Outcome, Transform};

/// Rename snake_case identifiers to camelCase (TitleCase identifiers keep
/// their leading capital), rewrite string literals that look like
/// snake_case keys, and re-case generated-GraphQL import filenames.
///
/// Identifiers with a leading underscore and ALL_CAPS constants are left
/// alone. Units under a `__generated__` directory are skipped entirely.
pub struct CamelCaseIdentifiers;

impl Transform for CamelCaseIdentifiers {
    fn name(&self) -> &'static str {
        "camel-case-identifiers"
    }

    fn description(&self) -> &'static str {
        "rename snake_case identifiers and matching string literals to camelCase"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        if unit.path().components().any(|c| c.as_os_str() == "__generated__") {
            return Ok(Outcome::unchanged());
        }

        let tree = unit.parse()?;
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        let snake_literal =
            Regex::new(r"^[a-z]\w*_\w+$").expect("literal pattern is valid");
        let graphql_filename =
            Regex::new(r"(\w+)\.graphql$").expect("filename pattern is valid");

        for id in tree.nodes_of_kind(NodeKind::Identifier) {
            let Some(name) = tree.identifier_name(id) else {
                continue;
            };
            // Leading underscores are intentional; ALL_CAPS are constants.
            let underscore_at = name.find('_');
            if !underscore_at.is_some_and(|at| at >= 1) || name.to_uppercase() == name {
                continue;
            }
            let is_title = name.chars().next().is_some_and(|c| c.is_uppercase());
            let renamed = if is_title {
                title_case(name)
            } else {
                camel_case(name)
            };
            if renamed != name {
                notes.push(format!("{name} → {renamed}"));
                edits.replace(tree.span(id), renamed);
            }
        }

        for literal in tree.nodes_of_kind(NodeKind::StringLiteral) {
            let in_import = tree
                .parent(literal)
                .is_some_and(|parent| tree.kind(parent) == NodeKind::Import);
            let Some(value) = tree.string_value(literal) else {
                continue;
            };

            if in_import {
                if !value.contains("/__generated__") {
                    continue;
                }
                let recased = graphql_filename.replace(value, |captures: &regex::Captures| {
                    let filename = &captures[1];
                    let recased = if filename.starts_with("use") {
                        camel_case(filename)
                    } else {
                        title_case(filename)
                    };
                    format!("{recased}.graphql")
                });
                if recased != value {
                    let recased = recased.into_owned();
                    notes.push(format!("{value} → {recased}"));
                    edits.replace(tree.span(literal), requote(tree.text(literal), &recased));
                }
            } else if snake_literal.is_match(value) {
                let recased = camel_case(value);
                if recased != value {
                    notes.push(format!("\"{value}\" → \"{recased}\""));
                    edits.replace(tree.span(literal), requote(tree.text(literal), &recased));
                }
            }
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// `block_version` → `blockVersion`; existing capitals survive.
fn camel_case(word: &str) -> String {
    let mut output = String::with_capacity(word.len());
    let mut upper_next = false;
    for ch in word.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            output.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            output.push(ch);
        }
    }
    output
}

/// `Block_type` → `BlockType`: camelCase with the first letter capitalized.
fn title_case(word: &str) -> String {
    let camel = camel_case(word);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

fn requote(original: &str, value: &str) -> String {
    let quote = original.chars().next().unwrap_or('\'');
    format!("{quote}{value}{quote}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_helper() {
        assert_eq!(camel_case("block_version"), "blockVersion");
        assert_eq!(camel_case("a_b_c"), "aBC");
        assert_eq!(title_case("block_type"), "BlockType");
    }

    #[test]
    fn test_identifiers_and_literals_are_recased() {
        let mut unit = SourceUnit::new(
            "src/project.ts",
            "const project_id = lookup(account_row, 'project_name')\n",
        );
        let outcome = CamelCaseIdentifiers.apply(&mut unit).unwrap();
        assert!(outcome.modified);
        assert_eq!(
            unit.text(),
            "const projectId = lookup(accountRow, 'projectName')\n"
        );
    }

    #[test]
    fn test_all_caps_and_leading_underscore_are_left_alone() {
        let source = "const MAX_RETRIES = use(_internal_slot)\n";
        let mut unit = SourceUnit::new("src/project.ts", source);
        let outcome = CamelCaseIdentifiers.apply(&mut unit).unwrap();
        assert!(!outcome.modified);
        assert_eq!(unit.text(), source);
    }

    #[test]
    fn test_generated_graphql_import_filenames_are_recased() {
        let mut unit = SourceUnit::new(
            "src/project.ts",
            "import query from './__generated__/use_projects.graphql'\n",
        );
        CamelCaseIdentifiers.apply(&mut unit).unwrap();
        assert_eq!(
            unit.text(),
            "import query from './__generated__/useProjects.graphql'\n"
        );
    }

    #[test]
    fn test_generated_units_are_skipped() {
        let source = "const project_id = 1\n";
        let mut unit = SourceUnit::new("src/__generated__/types.ts", source);
        let outcome = CamelCaseIdentifiers.apply(&mut unit).unwrap();
        assert!(!outcome.modified);
        assert_eq!(unit.text(), source);
    }
}
