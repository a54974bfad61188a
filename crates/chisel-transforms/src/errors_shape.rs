//! Error-constructor reshaping.
//!
//! Two companion rewrites for `new XError(...)` call sites: flattening
//! object-literal constructors into positional arguments, and collapsing
//! message templates with an embedded `JSON.stringify` context into
//! `messageWithContext(...)` calls.

use regex::Regex;

use chisel_morph::{EditSet, NodeId, NodeKind, SourceUnit, SyntaxTree};

use crate::error::{Result, TransformError};
use crate::{Outcome, Transform};

/// Rewrite `new XError({ message, context?, cause? })` into positional form:
///
/// ```text
/// new ErrorWithContext({ message: 'broke', context: { a, b } })
///   →  new ErrorWithContext(`broke
///      ${JSON.stringify({ a, b })}`)
/// ```
pub struct ErrorObjectToArgs;

impl Transform for ErrorObjectToArgs {
    fn name(&self) -> &'static str {
        "error-object-to-args"
    }

    fn description(&self) -> &'static str {
        "flatten object-literal error constructors into positional arguments"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let tree = unit.parse()?;
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        for ctor in error_constructions(&tree) {
            let name = constructor_name(&tree, ctor).unwrap_or_default();
            let arguments = tree.call_arguments(ctor);

            if arguments.iter().any(|&argument| {
                matches!(
                    tree.kind(argument),
                    NodeKind::StringLiteral | NodeKind::TemplateLiteral
                )
            }) {
                tracing::debug!(constructor = name, "already has a message; skipping");
                continue;
            }
            let Some(&object) = arguments
                .iter()
                .find(|&&argument| tree.kind(argument) == NodeKind::Object)
            else {
                tracing::debug!(constructor = name, "no options object; skipping");
                continue;
            };

            let mut message: Option<NodeId> = None;
            let mut context: Option<NodeId> = None;
            let mut cause: Option<NodeId> = None;
            for &property in tree.object_properties(object) {
                match tree.property_key(property) {
                    Some("message") => message = tree.property_value(property),
                    Some("context") => context = tree.property_value(property),
                    Some("cause") => cause = tree.property_value(property),
                    other => {
                        return Err(TransformError::UnsupportedShape {
                            path: unit.path().to_path_buf(),
                            message: format!(
                                "unrecognised property {:?} on new {name}(...)",
                                other.unwrap_or("<computed>")
                            ),
                        });
                    }
                }
            }
            let Some(message) = message else {
                return Err(TransformError::UnsupportedShape {
                    path: unit.path().to_path_buf(),
                    message: format!("new {name}(...) has no message property"),
                });
            };

            let message_text = tree.text(message);
            // The message body without its own quotes, for template embedding.
            let bare_message = message_text
                .get(1..message_text.len().saturating_sub(1))
                .unwrap_or_default();

            let replacement = match (context, cause) {
                (Some(context), Some(cause)) => format!(
                    "new {name}(`{bare_message}\n${{JSON.stringify({})}}`, {{cause: {}}})",
                    tree.text(context),
                    tree.text(cause)
                ),
                (Some(context), None) => format!(
                    "new {name}(`{bare_message}\n${{JSON.stringify({})}}`)",
                    tree.text(context)
                ),
                (None, Some(cause)) => {
                    format!("new {name}({message_text}, {{cause: {}}})", tree.text(cause))
                }
                (None, None) => format!("new {name}({message_text})"),
            };
            notes.push(format!("new {name}(...) reshaped"));
            edits.replace(tree.span(ctor), replacement);
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// Collapse `` new XError(`msg\n${JSON.stringify({ a, b })}`) `` into
/// `new XError(messageWithContext('msg', { a, b }))`.
pub struct ErrorMessageContext;

impl Transform for ErrorMessageContext {
    fn name(&self) -> &'static str {
        "error-message-context"
    }

    fn description(&self) -> &'static str {
        "collapse JSON.stringify message templates into messageWithContext calls"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let tree = unit.parse()?;
        let mut edits = EditSet::new();
        let mut notes = Vec::new();

        let stringify = Regex::new(r"JSON\.stringify\(\{([^}]+)\}\)")
            .expect("stringify pattern is valid");

        for ctor in error_constructions(&tree) {
            let Some(&template) = tree
                .call_arguments(ctor)
                .iter()
                .find(|&&argument| tree.kind(argument) == NodeKind::TemplateLiteral)
            else {
                continue;
            };

            let full = tree.text(template);
            let Some(at) = full.find("${JSON.stringify({") else {
                continue;
            };
            let message = full[1..at].trim();
            let Some(context) = stringify
                .captures(&full[at..])
                .and_then(|captures| captures.get(1))
                .map(|capture| capture.as_str().trim())
            else {
                continue;
            };

            let replacement = format!("messageWithContext(`{message}`, {{ {context} }})");
            notes.push(replacement.clone());
            edits.replace(tree.span(template), replacement);
        }

        let modified = unit.apply_edits(edits)?;
        Ok(Outcome { modified, notes })
    }
}

/// `new X(...)` nodes whose class name ends in `Error`.
fn error_constructions(tree: &SyntaxTree) -> Vec<NodeId> {
    tree.nodes_of_kind(NodeKind::New)
        .into_iter()
        .filter(|&ctor| {
            constructor_name(tree, ctor).is_some_and(|name| name.ends_with("Error"))
        })
        .collect()
}

fn constructor_name<'t>(tree: &'t SyntaxTree, ctor: NodeId) -> Option<&'t str> {
    tree.call_callee(ctor)
        .and_then(|callee| tree.identifier_name(callee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_message_object_is_flattened() {
        let mut unit = SourceUnit::new(
            "src/handler.ts",
            "throw new SimpleError({ message: 'my message' })\n",
        );
        ErrorObjectToArgs.apply(&mut unit).unwrap();
        assert_eq!(unit.text(), "throw new SimpleError('my message')\n");
    }

    #[test]
    fn test_context_becomes_stringified_template() {
        let mut unit = SourceUnit::new(
            "src/handler.ts",
            "throw new ErrorWithContext({ message: 'broke', context: { a, b } })\n",
        );
        ErrorObjectToArgs.apply(&mut unit).unwrap();
        assert_eq!(
            unit.text(),
            "throw new ErrorWithContext(`broke\n${JSON.stringify({ a, b })}`)\n"
        );
    }

    #[test]
    fn test_cause_is_kept_as_second_argument() {
        let mut unit = SourceUnit::new(
            "src/handler.ts",
            "throw new WrappedError({ message: 'broke', cause: error })\n",
        );
        ErrorObjectToArgs.apply(&mut unit).unwrap();
        assert_eq!(
            unit.text(),
            "throw new WrappedError('broke', {cause: error})\n"
        );
    }

    #[test]
    fn test_unrecognised_property_is_an_error() {
        let mut unit = SourceUnit::new(
            "src/handler.ts",
            "throw new OddError({ message: 'broke', extra: 1 })\n",
        );
        let error = ErrorObjectToArgs.apply(&mut unit).unwrap_err();
        assert!(error.to_string().contains("extra"));
    }

    #[test]
    fn test_stringified_template_collapses_to_message_with_context() {
        let mut unit = SourceUnit::new(
            "src/handler.ts",
            "throw new DbError(`query failed\n${JSON.stringify({ a, b })}`)\n",
        );
        ErrorMessageContext.apply(&mut unit).unwrap();
        assert_eq!(
            unit.text(),
            "throw new DbError(messageWithContext(`query failed`, { a, b }))\n"
        );
    }

    #[test]
    fn test_non_error_constructors_are_ignored() {
        let source = "const client = new HttpClient({ retries: 3 })\n";
        let mut unit = SourceUnit::new("src/handler.ts", source);
        let outcome = ErrorObjectToArgs.apply(&mut unit).unwrap();
        assert!(!outcome.modified);
        assert_eq!(unit.text(), source);
    }
}
