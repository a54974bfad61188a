//! Snapshot shape tests: kinds, links, spans, text slices

use chisel_morph::{MorphError, NodeKind, SourceUnit};

#[test]
fn test_chain_calls_are_indexed_outermost_first() {
    let unit = SourceUnit::new("input.ts", "db.selectFrom('block').execute()\n");
    let tree = unit.parse().unwrap();

    let calls = tree.nodes_of_kind(NodeKind::Call);
    assert_eq!(calls.len(), 2);
    // Pre-order allocation: the whole chain first, the inner call second.
    assert_eq!(tree.text(calls[0]), "db.selectFrom('block').execute()");
    assert_eq!(tree.text(calls[1]), "db.selectFrom('block')");
}

#[test]
fn test_member_links_and_names() {
    let unit = SourceUnit::new("input.ts", "db.selectFrom('block').execute()\n");
    let tree = unit.parse().unwrap();

    let outer = tree.nodes_of_kind(NodeKind::Call)[0];
    let callee = tree.call_callee(outer).unwrap();
    assert_eq!(tree.kind(callee), NodeKind::Member);
    assert_eq!(tree.member_property(callee), Some("execute"));

    let inner = tree.member_object(callee).unwrap();
    assert_eq!(tree.kind(inner), NodeKind::Call);
    let inner_callee = tree.call_callee(inner).unwrap();
    assert_eq!(tree.member_property(inner_callee), Some("selectFrom"));

    let base = tree.member_object(inner_callee).unwrap();
    assert_eq!(tree.kind(base), NodeKind::Identifier);
    assert_eq!(tree.identifier_name(base), Some("db"));
}

#[test]
fn test_ancestors_reach_the_statement_and_program() {
    let unit = SourceUnit::new("input.ts", "const rows = db.selectFrom('block').execute()\n");
    let tree = unit.parse().unwrap();

    let inner = tree.nodes_of_kind(NodeKind::Call)[1];
    let kinds: Vec<NodeKind> = tree.ancestors(inner).map(|id| tree.kind(id)).collect();
    assert!(kinds.contains(&NodeKind::VariableStatement));
    assert_eq!(kinds.last(), Some(&NodeKind::Program));
}

#[test]
fn test_arrow_param_and_expression_body() {
    let unit = SourceUnit::new("input.ts", "db.$if(cond, (qb) => qb.where('id', '=', 1))\n");
    let tree = unit.parse().unwrap();

    let arrows = tree.nodes_of_kind(NodeKind::Arrow);
    assert_eq!(arrows.len(), 1);
    assert_eq!(tree.arrow_params(arrows[0]), ["qb".to_string()]);

    let body = tree.arrow_body(arrows[0]).unwrap();
    assert_eq!(tree.kind(body), NodeKind::Call);
    assert_eq!(tree.text(body), "qb.where('id', '=', 1)");
}

#[test]
fn test_arrow_block_body_is_a_block() {
    let unit = SourceUnit::new("input.ts", "db.$if(cond, (qb) => { return qb })\n");
    let tree = unit.parse().unwrap();

    let arrow = tree.nodes_of_kind(NodeKind::Arrow)[0];
    let body = tree.arrow_body(arrow).unwrap();
    assert_eq!(tree.kind(body), NodeKind::Block);
}

#[test]
fn test_call_arguments_preserve_source_text() {
    let unit = SourceUnit::new(
        "input.ts",
        "db.where('block.id', '<', paginationOptions?.cursor!)\n",
    );
    let tree = unit.parse().unwrap();

    let call = tree.nodes_of_kind(NodeKind::Call)[0];
    let arguments = tree.call_arguments(call);
    assert_eq!(arguments.len(), 3);
    assert_eq!(tree.text(arguments[0]), "'block.id'");
    assert_eq!(tree.text(arguments[2]), "paginationOptions?.cursor!");
}

#[test]
fn test_import_declaration_source_and_specifiers() {
    let unit = SourceUnit::new(
        "input.ts",
        "import { DbError, messageWithContext } from './util/error.js'\n",
    );
    let tree = unit.parse().unwrap();

    let imports = tree.nodes_of_kind(NodeKind::Import);
    assert_eq!(imports.len(), 1);

    let source = tree.import_source(imports[0]).unwrap();
    assert_eq!(tree.string_value(source), Some("./util/error.js"));
    assert_eq!(tree.text(source), "'./util/error.js'");

    let specifiers = tree.import_specifiers(imports[0]);
    let names: Vec<&str> = specifiers
        .iter()
        .filter_map(|&id| tree.specifier_imported(id))
        .collect();
    assert_eq!(names, ["DbError", "messageWithContext"]);
}

#[test]
fn test_chains_inside_function_bodies_are_reachable() {
    let source = "\
async function getRows() {
  return db.selectFrom('block').execute()
}
";
    let unit = SourceUnit::new("input.ts", source);
    let tree = unit.parse().unwrap();

    let calls = tree.nodes_of_kind(NodeKind::Call);
    assert_eq!(calls.len(), 2);

    let kinds: Vec<NodeKind> = tree.ancestors(calls[0]).map(|id| tree.kind(id)).collect();
    assert!(kinds.contains(&NodeKind::ReturnStatement));
    assert!(kinds.contains(&NodeKind::Block));
}

#[test]
fn test_parse_error_names_the_unit() {
    let unit = SourceUnit::new("broken.ts", "const = nope nope\n");
    let error = unit.parse().unwrap_err();
    match error {
        MorphError::ParseFailed { path, .. } => {
            assert!(path.ends_with("broken.ts"));
        }
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}
