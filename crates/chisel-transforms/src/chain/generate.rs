//! Imperative code generation for conditional chains.

use chisel_morph::{NodeId, NodeKind, SyntaxTree};
use regex::Regex;

use super::segment::{extract_plain_prefix, split_sink};
use super::{ChainConfig, direct_conditional_calls};
use crate::error::ChainError;

/// Rewrite a whole chain into accumulator + `if` blocks + sink return.
///
/// Returns `Ok(None)` when the chain yields no usable prefix (nothing to
/// rewrite). Errors abort this chain only.
pub fn refactor_chain(
    tree: &SyntaxTree,
    chain_root: NodeId,
    config: &ChainConfig,
) -> Result<Option<String>, ChainError> {
    let split = split_sink(tree, chain_root, config)?;

    let prefix = extract_plain_prefix(tree, split.inner, config);
    if prefix.trim().is_empty() {
        return Ok(None);
    }

    let conditionals = direct_conditional_calls(tree, split.inner, config);

    let mut output = String::new();
    output.push_str(&format!("let {} = {}\n\n", config.accumulator, prefix));

    for &conditional in &conditionals {
        emit_conditional(tree, conditional, config, 0, &mut output)?;
    }

    output.push_str(&format!(
        "return {}.{}()",
        config.accumulator,
        split.sink_name(tree)
    ));
    Ok(Some(output))
}

/// Emit one `if` block for a conditional-combinator call.
///
/// A leaf conditional (no further conditionals in its callback body)
/// becomes a single guarded reassignment. A conditional whose callback
/// carries nested conditionals first reassigns the body's own plain prefix
/// (unless that prefix is just the bare parameter), then recurses one
/// indent level deeper for each nested conditional. Depth is unbounded.
fn emit_conditional(
    tree: &SyntaxTree,
    conditional: NodeId,
    config: &ChainConfig,
    depth: usize,
    output: &mut String,
) -> Result<(), ChainError> {
    let arguments = tree.call_arguments(conditional);
    if arguments.len() != 2 {
        return Err(ChainError::MalformedConditional {
            found: arguments.len(),
        });
    }
    let condition = tree.text(arguments[0]);
    let callback = arguments[1];

    if tree.kind(callback) != NodeKind::Arrow {
        tracing::warn!(
            combinator = %config.combinator,
            "callback is not an inline arrow function; leaving this conditional as is"
        );
        return Ok(());
    }
    let parameter = tree
        .arrow_params(callback)
        .first()
        .cloned()
        .ok_or(ChainError::MissingCallbackParam)?;
    let Some(body) = tree.arrow_body(callback) else {
        return Ok(());
    };
    if !matches!(
        tree.kind(body),
        NodeKind::Call | NodeKind::Member | NodeKind::Identifier
    ) {
        tracing::warn!(
            combinator = %config.combinator,
            "callback body is not a chain expression; leaving this conditional as is"
        );
        return Ok(());
    }

    let pad = "  ".repeat(depth);
    let nested = direct_conditional_calls(tree, body, config);

    output.push_str(&format!("{pad}if ({condition}) {{\n"));
    if nested.is_empty() {
        let body_text = substitute_parameter(tree.text(body), &parameter, &config.accumulator);
        output.push_str(&format!("{pad}  {} = {}\n", config.accumulator, body_text));
    } else {
        let before_nested = extract_plain_prefix(tree, body, config);
        if before_nested.trim() != parameter {
            let before_nested =
                substitute_parameter(&before_nested, &parameter, &config.accumulator);
            output.push_str(&format!("{pad}  {} = {}\n", config.accumulator, before_nested));
        }
        for &inner in &nested {
            emit_conditional(tree, inner, config, depth + 1, output)?;
        }
    }
    output.push_str(&format!("{pad}}}\n"));
    Ok(())
}

/// Replace every whole-word occurrence of the callback parameter with the
/// accumulator name.
///
/// This is a lexical substitution, not a scope-aware rename: an unrelated
/// in-scope identifier that happens to share the parameter's name is
/// rewritten too. Substring occurrences are left alone.
fn substitute_parameter(text: &str, parameter: &str, accumulator: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(parameter));
    let matcher = Regex::new(&pattern).expect("escaped identifier is a valid pattern");
    matcher.replace_all(text, accumulator).into_owned()
}

#[cfg(test)]
mod tests {
    use super::substitute_parameter;

    #[test]
    fn test_whole_word_substitution_only() {
        let body = "qb.where('a', '=', qbx).orderBy(qb)";
        assert_eq!(
            substitute_parameter(body, "qb", "query"),
            "query.where('a', '=', qbx).orderBy(query)"
        );
    }

    #[test]
    fn test_substitution_inside_strings_is_lexical() {
        // Known approximation: string contents are not exempt.
        let body = "qb.whereRef('qb.id', '=', qb)";
        assert_eq!(
            substitute_parameter(body, "qb", "query"),
            "query.whereRef('query.id', '=', query)"
        );
    }
}
