//! Conditional fluent-chain refactoring.
//!
//! Query-builder chains may carry a conditional combinator (`$if` in the
//! builder API this tool was written for): a two-argument method taking a
//! condition and a callback that extends the chain only when the condition
//! holds at runtime. This module rewrites such chains into their imperative
//! equivalent: a `let` accumulator, one `if` block per conditional, and a
//! final `return` of the original sink call.
//!
//! ```text
//! const rows = db                          let query = db
//!   .selectFrom('block')                     .selectFrom('block')
//!   .$if(hasId, (qb) =>            ==>
//!     qb.where('id', '=', id))             if (hasId) {
//!   .execute()                               query = query.where('id', '=', id)
//!                                          }
//!                                          return query.execute()
//! ```
//!
//! Only chains rooted at a recognized handle identifier are touched; chains
//! on unrelated objects are expected and skipped silently.

mod generate;
mod segment;

use std::path::PathBuf;

use indexmap::IndexSet;
use serde::Deserialize;

use chisel_morph::{EditSet, NodeId, NodeKind, SourceUnit, SyntaxTree};

use crate::error::{ChainError, Result, TransformError};
use crate::{Outcome, Transform};

pub use generate::refactor_chain;
pub use segment::{SinkSplit, extract_plain_prefix, split_sink};

/// Configuration for the chain engine.
///
/// Every deployment targets a different builder surface, so none of these
/// are constants: the handles a chain may be rooted at, the name of the
/// conditional combinator, the allow-list of terminal consumption methods,
/// and the name of the generated accumulator variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub root_identifiers: Vec<String>,
    pub combinator: String,
    pub sink_methods: Vec<String>,
    pub accumulator: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            root_identifiers: vec!["db".to_string(), "dbtx".to_string()],
            combinator: "$if".to_string(),
            sink_methods: vec![
                "execute".to_string(),
                "executeTakeFirst".to_string(),
                "executeTakeFirstOrThrow".to_string(),
            ],
            accumulator: "query".to_string(),
        }
    }
}

/// True iff `node` is a call whose callee is a member access naming the
/// configured combinator.
pub fn is_conditional_call(tree: &SyntaxTree, node: NodeId, config: &ChainConfig) -> bool {
    if tree.kind(node) != NodeKind::Call {
        return false;
    }
    tree.call_callee(node)
        .filter(|&callee| tree.kind(callee) == NodeKind::Member)
        .and_then(|callee| tree.member_property(callee))
        .is_some_and(|property| property == config.combinator)
}

/// Walk up from a conditional call to the outermost node of its chain, then
/// verify the chain bottoms out at a recognized root identifier.
///
/// `None` is the normal outcome for chains hanging off unrelated objects
/// (including combinator calls nested inside another chain's callback,
/// whose own chain is rooted at the callback parameter).
pub fn find_chain_root(tree: &SyntaxTree, node: NodeId, config: &ChainConfig) -> Option<NodeId> {
    let mut highest = node;
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        match tree.kind(parent) {
            // Statement boundary: the chain ends here.
            NodeKind::VariableStatement
            | NodeKind::ReturnStatement
            | NodeKind::ExpressionStatement
            | NodeKind::Block => break,
            NodeKind::Call | NodeKind::Member => {
                highest = parent;
                current = parent;
            }
            _ => break,
        }
    }

    chain_starts_with_recognized_root(tree, highest, config).then_some(highest)
}

fn chain_starts_with_recognized_root(
    tree: &SyntaxTree,
    node: NodeId,
    config: &ChainConfig,
) -> bool {
    let mut current = node;
    loop {
        match tree.kind(current) {
            NodeKind::Identifier => {
                let name = tree.identifier_name(current).unwrap_or_default();
                return config.root_identifiers.iter().any(|root| root == name);
            }
            NodeKind::Call => match tree.call_callee(current) {
                Some(callee) => current = callee,
                None => return false,
            },
            NodeKind::Member => match tree.member_object(current) {
                Some(object) => current = object,
                None => return false,
            },
            _ => return false,
        }
    }
}

/// Conditional calls chained directly on `node`, in textual order.
///
/// The walk follows call→member→object links only; callback bodies are
/// never entered, so nested conditionals are discovered one level at a time
/// by whoever recurses into the body.
pub fn direct_conditional_calls(
    tree: &SyntaxTree,
    node: NodeId,
    config: &ChainConfig,
) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut current = node;
    while tree.kind(current) == NodeKind::Call {
        if is_conditional_call(tree, current, config) {
            found.push(current);
        }
        let next = tree
            .call_callee(current)
            .filter(|&callee| tree.kind(callee) == NodeKind::Member)
            .and_then(|callee| tree.member_object(callee));
        match next {
            Some(object) => current = object,
            None => break,
        }
    }
    // Collected outermost-first during descent; chain order is the reverse.
    found.reverse();
    found
}

/// Nearest enclosing statement a rewrite may replace.
fn enclosing_statement(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|&ancestor| {
        matches!(
            tree.kind(ancestor),
            NodeKind::VariableStatement | NodeKind::ReturnStatement | NodeKind::ExpressionStatement
        )
    })
}

/// The orchestrating transform: finds every conditional chain in a unit and
/// rewrites each exactly once.
#[derive(Debug, Default)]
pub struct UnrollIfChains {
    config: ChainConfig,
}

impl UnrollIfChains {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }
}

impl Transform for UnrollIfChains {
    fn name(&self) -> &'static str {
        "unroll-if-chains"
    }

    fn description(&self) -> &'static str {
        "rewrite conditional-combinator chains into accumulator reassignment under if blocks"
    }

    fn apply(&self, unit: &mut SourceUnit) -> Result<Outcome> {
        let tree = unit.parse()?;

        // A chain with several conditionals resolves to one root; the set
        // keeps discovery order so rewrites and logs are deterministic.
        let mut roots: IndexSet<NodeId> = IndexSet::new();
        for call in tree.nodes_of_kind(NodeKind::Call) {
            if !is_conditional_call(&tree, call, &self.config) {
                continue;
            }
            match find_chain_root(&tree, call, &self.config) {
                Some(root) => {
                    roots.insert(root);
                }
                None => {
                    tracing::debug!(
                        path = %unit.path().display(),
                        "conditional call not rooted at a recognized handle; skipping"
                    );
                }
            }
        }

        let mut edits = EditSet::new();
        let mut failures: Vec<ChainError> = Vec::new();
        for &root in &roots {
            tracing::debug!(
                path = %unit.path().display(),
                offset = tree.span(root).start,
                "rewriting chain"
            );
            match refactor_chain(&tree, root, &self.config) {
                Ok(Some(replacement)) => match enclosing_statement(&tree, root) {
                    Some(statement) => edits.replace(tree.span(statement), replacement),
                    None => failures.push(ChainError::NoEnclosingStatement),
                },
                Ok(None) => {}
                Err(error) => {
                    tracing::error!(
                        path = %unit.path().display(),
                        chain = tree.text(root),
                        %error,
                        "chain rewrite failed"
                    );
                    failures.push(error);
                }
            }
        }

        if !failures.is_empty() {
            return Err(TransformError::ChainRewrite {
                path: PathBuf::from(unit.path()),
                failures,
            });
        }

        let rewritten = edits.len();
        let modified = unit.apply_edits(edits)?;
        if modified {
            tracing::info!(
                path = %unit.path().display(),
                chains = rewritten,
                "unrolled conditional chains"
            );
        }
        Ok(Outcome {
            modified,
            notes: Vec::new(),
        })
    }
}
