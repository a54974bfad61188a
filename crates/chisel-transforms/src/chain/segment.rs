//! Chain segmentation: terminal-sink extraction and plain-prefix rebuild.

use chisel_morph::{NodeId, NodeKind, SyntaxTree};

use super::ChainConfig;
use crate::error::ChainError;

/// A chain split at its terminal consumption method.
#[derive(Debug, Clone, Copy)]
pub struct SinkSplit {
    /// The chain with its terminal method call removed (the member's object).
    pub inner: NodeId,
    /// Id of the node whose text names the sink; resolved via
    /// [`SinkSplit::sink_name`].
    sink: NodeId,
}

impl SinkSplit {
    pub fn sink_name<'t>(&self, tree: &'t SyntaxTree) -> &'t str {
        tree.member_property(self.sink).unwrap_or_default()
    }
}

/// Split the terminal method off a chain-root call.
///
/// The outermost call must be a method invocation whose name is on the sink
/// allow-list; anything else is a hard error for this chain, because
/// rewriting it would drop the consumption step that actually runs the
/// query.
pub fn split_sink(
    tree: &SyntaxTree,
    chain_root: NodeId,
    config: &ChainConfig,
) -> Result<SinkSplit, ChainError> {
    if tree.kind(chain_root) != NodeKind::Call {
        return Err(ChainError::NotACall);
    }
    let callee = tree.call_callee(chain_root).ok_or(ChainError::NotACall)?;
    if tree.kind(callee) != NodeKind::Member {
        return Err(ChainError::NotAMethodCall);
    }
    let method = tree.member_property(callee).unwrap_or_default();
    if !config.sink_methods.iter().any(|sink| sink == method) {
        return Err(ChainError::UnsupportedSink {
            method: method.to_string(),
            allowed: config.sink_methods.join(", "),
        });
    }
    let inner = tree.member_object(callee).ok_or(ChainError::NotAMethodCall)?;
    Ok(SinkSplit {
        inner,
        sink: callee,
    })
}

/// Rebuild a chain's text with every conditional-combinator call elided.
///
/// Non-call input is returned as its literal text (bare identifiers,
/// already-minimal expressions). For a chain, the call/member links are
/// walked outermost-to-innermost collecting `(method, argument-text)` pairs
/// for every non-combinator call, then reassembled in original textual
/// order as `base` plus one `.method(args)` line per retained call. The
/// elided combinator calls are re-expressed later as `if` blocks by the
/// generator, never inlined here.
pub fn extract_plain_prefix(tree: &SyntaxTree, node: NodeId, config: &ChainConfig) -> String {
    if tree.kind(node) != NodeKind::Call {
        return tree.text(node).to_string();
    }

    let mut retained: Vec<(String, String)> = Vec::new();
    let mut base: Option<String> = None;
    let mut current = node;

    while tree.kind(current) == NodeKind::Call {
        let Some(callee) = tree.call_callee(current) else {
            break;
        };
        if tree.kind(callee) == NodeKind::Member {
            let method = tree.member_property(callee).unwrap_or_default();
            if method != config.combinator {
                let arguments = tree
                    .call_arguments(current)
                    .iter()
                    .map(|&argument| tree.text(argument))
                    .collect::<Vec<_>>()
                    .join(", ");
                retained.push((method.to_string(), arguments));
            }
            match tree.member_object(callee) {
                Some(object) => current = object,
                None => break,
            }
        } else {
            // Base is a plain call (e.g. a factory); keep the whole call.
            base = Some(tree.text(current).to_string());
            break;
        }
    }

    let mut prefix = base.unwrap_or_else(|| tree.text(current).to_string());
    for (method, arguments) in retained.iter().rev() {
        prefix.push_str("\n  .");
        prefix.push_str(method);
        prefix.push('(');
        prefix.push_str(arguments);
        prefix.push(')');
    }
    prefix
}
