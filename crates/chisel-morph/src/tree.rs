//! Owned arena snapshot of a parsed syntax tree.
//!
//! The snapshot decouples tree queries from the borrow-heavy OXC AST: one
//! indexing pass walks the parsed program and records every node of interest
//! as a `NodeData` entry with a stable integer id, its byte span, its parent
//! and its children in document order. All later queries (ancestor walks,
//! kind filters, text slices) run against the arena, and mutation happens by
//! producing a new source string through an [`EditSet`](crate::EditSet).
//! Node ids never survive a mutation.

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, ArrowFunctionExpression, CallExpression, ChainElement,
    ClassElement, Declaration, Expression, ExportDefaultDeclarationKind, FormalParameter,
    FunctionBody, ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName,
    ObjectExpression, ObjectPropertyKind, Program, PropertyKey, Statement,
    StaticMemberExpression, StringLiteral as AstStringLiteral,
};
use oxc_span::{GetSpan, Span};

/// Stable handle to a node in a [`SyntaxTree`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Classification of snapshot nodes.
///
/// Only the kinds the transforms navigate are distinguished; everything else
/// is `Other`. Statement kinds mirror the boundaries the chain engine stops
/// at: variable statements, return statements, expression statements, blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    VariableStatement,
    ReturnStatement,
    ExpressionStatement,
    Block,
    Call,
    Member,
    Identifier,
    Arrow,
    New,
    StringLiteral,
    TemplateLiteral,
    Object,
    Property,
    Import,
    ImportSpecifier,
    Other,
}

#[derive(Debug, Clone)]
enum NodeDetail {
    None,
    Identifier { name: String },
    Member { object: NodeId, property: String },
    Call { callee: NodeId, arguments: Vec<NodeId> },
    New { callee: NodeId, arguments: Vec<NodeId> },
    Arrow { params: Vec<String>, body: NodeId },
    StringLiteral { value: String },
    Import { source: NodeId, specifiers: Vec<NodeId> },
    ImportSpecifier { imported: String, local: String },
    Object { properties: Vec<NodeId> },
    Property { key: Option<String>, value: Option<NodeId> },
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    detail: NodeDetail,
}

/// Snapshot of one parsed source unit.
#[derive(Debug)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub(crate) fn from_program(source: &str, program: &Program<'_>) -> Self {
        let mut indexer = Indexer { nodes: Vec::new() };
        indexer.index_program(program);
        Self {
            source: source.to_string(),
            nodes: indexer.nodes,
        }
    }

    /// The program node; always id 0.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Full source text of the unit this snapshot was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Exact original source slice for a node.
    pub fn text(&self, id: NodeId) -> &str {
        let span = self.span(id);
        &self.source[span.start as usize..span.end as usize]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Walk from a node's parent up to the program node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// All nodes of a kind, in document (pre-order) order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.kind == kind)
            .map(|(index, _)| NodeId(index as u32))
            .collect()
    }

    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn member_object(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Member { object, .. } => Some(*object),
            _ => None,
        }
    }

    /// Property name of a static member access (`x.foo` → `"foo"`).
    pub fn member_property(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Member { property, .. } => Some(property),
            _ => None,
        }
    }

    pub fn call_callee(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Call { callee, .. } => Some(*callee),
            NodeDetail::New { callee, .. } => Some(*callee),
            _ => None,
        }
    }

    pub fn call_arguments(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()].detail {
            NodeDetail::Call { arguments, .. } => arguments,
            NodeDetail::New { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Parameter names of an arrow function, declaration order.
    pub fn arrow_params(&self, id: NodeId) -> &[String] {
        match &self.nodes[id.index()].detail {
            NodeDetail::Arrow { params, .. } => params,
            _ => &[],
        }
    }

    /// Body of an arrow function: the bare expression for expression bodies,
    /// the block node otherwise.
    pub fn arrow_body(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Arrow { body, .. } => Some(*body),
            _ => None,
        }
    }

    /// Cooked value of a string literal (without quotes).
    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::StringLiteral { value } => Some(value),
            _ => None,
        }
    }

    /// The module-specifier string literal of an import declaration.
    pub fn import_source(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Import { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Named specifiers of an import declaration, declaration order.
    pub fn import_specifiers(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()].detail {
            NodeDetail::Import { specifiers, .. } => specifiers,
            _ => &[],
        }
    }

    pub fn specifier_imported(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::ImportSpecifier { imported, .. } => Some(imported),
            _ => None,
        }
    }

    pub fn specifier_local(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::ImportSpecifier { local, .. } => Some(local),
            _ => None,
        }
    }

    pub fn object_properties(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()].detail {
            NodeDetail::Object { properties } => properties,
            _ => &[],
        }
    }

    pub fn property_key(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Property { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    pub fn property_value(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id.index()].detail {
            NodeDetail::Property { value, .. } => *value,
            _ => None,
        }
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

struct Indexer {
    nodes: Vec<NodeData>,
}

impl Indexer {
    fn alloc(&mut self, kind: NodeKind, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            span,
            parent,
            children: Vec::new(),
            detail: NodeDetail::None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn index_program(&mut self, program: &Program<'_>) -> NodeId {
        let root = self.alloc(NodeKind::Program, program.span, None);
        for statement in &program.body {
            self.index_statement(statement, root);
        }
        root
    }

    fn index_statement(&mut self, statement: &Statement<'_>, parent: NodeId) -> NodeId {
        match statement {
            Statement::VariableDeclaration(decl) => {
                let id = self.alloc(NodeKind::VariableStatement, decl.span, Some(parent));
                for declarator in &decl.declarations {
                    self.index_binding_identifier(&declarator.id, id);
                    if let Some(init) = &declarator.init {
                        self.index_expression(init, id);
                    }
                }
                id
            }
            Statement::ReturnStatement(ret) => {
                let id = self.alloc(NodeKind::ReturnStatement, ret.span, Some(parent));
                if let Some(argument) = &ret.argument {
                    self.index_expression(argument, id);
                }
                id
            }
            Statement::ExpressionStatement(stmt) => {
                let id = self.alloc(NodeKind::ExpressionStatement, stmt.span, Some(parent));
                self.index_expression(&stmt.expression, id);
                id
            }
            Statement::BlockStatement(block) => {
                let id = self.alloc(NodeKind::Block, block.span, Some(parent));
                for statement in &block.body {
                    self.index_statement(statement, id);
                }
                id
            }
            Statement::ThrowStatement(stmt) => {
                let id = self.alloc(NodeKind::Other, stmt.span, Some(parent));
                self.index_expression(&stmt.argument, id);
                id
            }
            Statement::IfStatement(stmt) => {
                let id = self.alloc(NodeKind::Other, stmt.span, Some(parent));
                self.index_expression(&stmt.test, id);
                self.index_statement(&stmt.consequent, id);
                if let Some(alternate) = &stmt.alternate {
                    self.index_statement(alternate, id);
                }
                id
            }
            Statement::TryStatement(stmt) => {
                let id = self.alloc(NodeKind::Other, stmt.span, Some(parent));
                self.index_block(&stmt.block.body, stmt.block.span, id);
                if let Some(handler) = &stmt.handler {
                    self.index_block(&handler.body.body, handler.body.span, id);
                }
                if let Some(finalizer) = &stmt.finalizer {
                    self.index_block(&finalizer.body, finalizer.span, id);
                }
                id
            }
            Statement::FunctionDeclaration(function) => {
                let id = self.alloc(NodeKind::Other, function.span, Some(parent));
                if let Some(body) = &function.body {
                    self.index_function_body(body, id);
                }
                id
            }
            Statement::ClassDeclaration(class) => {
                let id = self.alloc(NodeKind::Other, class.span, Some(parent));
                for element in &class.body.body {
                    match element {
                        ClassElement::MethodDefinition(method) => {
                            if let Some(body) = &method.value.body {
                                self.index_function_body(body, id);
                            }
                        }
                        ClassElement::PropertyDefinition(property) => {
                            if let Some(value) = &property.value {
                                self.index_expression(value, id);
                            }
                        }
                        _ => {}
                    }
                }
                id
            }
            Statement::ImportDeclaration(import) => self.index_import(import, parent),
            Statement::ExportNamedDeclaration(export) => {
                let id = self.alloc(NodeKind::Other, export.span, Some(parent));
                match &export.declaration {
                    Some(Declaration::VariableDeclaration(decl)) => {
                        for declarator in &decl.declarations {
                            if let Some(init) = &declarator.init {
                                self.index_expression(init, id);
                            }
                        }
                    }
                    Some(Declaration::FunctionDeclaration(function)) => {
                        if let Some(body) = &function.body {
                            self.index_function_body(body, id);
                        }
                    }
                    _ => {}
                }
                id
            }
            Statement::ExportDefaultDeclaration(export) => {
                let id = self.alloc(NodeKind::Other, export.span, Some(parent));
                match &export.declaration {
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        if let Some(body) = &function.body {
                            self.index_function_body(body, id);
                        }
                    }
                    ExportDefaultDeclarationKind::ArrowFunctionExpression(arrow) => {
                        self.index_arrow(arrow, id);
                    }
                    _ => {}
                }
                id
            }
            other => self.alloc(NodeKind::Other, other.span(), Some(parent)),
        }
    }

    fn index_binding_identifier(
        &mut self,
        pattern: &oxc_ast::ast::BindingPattern<'_>,
        parent: NodeId,
    ) {
        if let oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) = &pattern.kind {
            let id = self.alloc(NodeKind::Identifier, ident.span, Some(parent));
            self.nodes[id.index()].detail = NodeDetail::Identifier {
                name: ident.name.to_string(),
            };
        }
    }

    fn index_block(&mut self, statements: &[Statement<'_>], span: Span, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Block, span, Some(parent));
        for statement in statements {
            self.index_statement(statement, id);
        }
        id
    }

    fn index_function_body(&mut self, body: &FunctionBody<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Block, body.span, Some(parent));
        for statement in &body.statements {
            self.index_statement(statement, id);
        }
        id
    }

    fn index_expression(&mut self, expression: &Expression<'_>, parent: NodeId) -> NodeId {
        match expression {
            Expression::Identifier(ident) => {
                let id = self.alloc(NodeKind::Identifier, ident.span, Some(parent));
                self.nodes[id.index()].detail = NodeDetail::Identifier {
                    name: ident.name.to_string(),
                };
                id
            }
            Expression::CallExpression(call) => self.index_call(call, parent),
            Expression::StaticMemberExpression(member) => self.index_member(member, parent),
            Expression::ArrowFunctionExpression(arrow) => self.index_arrow(arrow, parent),
            Expression::NewExpression(new) => {
                let id = self.alloc(NodeKind::New, new.span, Some(parent));
                let callee = self.index_expression(&new.callee, id);
                let arguments = self.index_arguments(&new.arguments, id);
                self.nodes[id.index()].detail = NodeDetail::New { callee, arguments };
                id
            }
            Expression::StringLiteral(literal) => self.index_string_literal(literal, parent),
            Expression::TemplateLiteral(template) => {
                self.alloc(NodeKind::TemplateLiteral, template.span, Some(parent))
            }
            Expression::ObjectExpression(object) => self.index_object(object, parent),
            Expression::ArrayExpression(array) => {
                let id = self.alloc(NodeKind::Other, array.span, Some(parent));
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            let spread_id = self.alloc(NodeKind::Other, spread.span, Some(id));
                            self.index_expression(&spread.argument, spread_id);
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        other => {
                            if let Some(expression) = other.as_expression() {
                                self.index_expression(expression, id);
                            }
                        }
                    }
                }
                id
            }
            Expression::ParenthesizedExpression(paren) => {
                let id = self.alloc(NodeKind::Other, paren.span, Some(parent));
                self.index_expression(&paren.expression, id);
                id
            }
            Expression::AwaitExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.argument, id);
                id
            }
            Expression::ChainExpression(chain) => {
                let id = self.alloc(NodeKind::Other, chain.span, Some(parent));
                match &chain.expression {
                    ChainElement::CallExpression(call) => {
                        self.index_call(call, id);
                    }
                    ChainElement::StaticMemberExpression(member) => {
                        self.index_member(member, id);
                    }
                    _ => {}
                }
                id
            }
            Expression::BinaryExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.left, id);
                self.index_expression(&expr.right, id);
                id
            }
            Expression::LogicalExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.left, id);
                self.index_expression(&expr.right, id);
                id
            }
            Expression::ConditionalExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.test, id);
                self.index_expression(&expr.consequent, id);
                self.index_expression(&expr.alternate, id);
                id
            }
            Expression::UnaryExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.argument, id);
                id
            }
            Expression::TSNonNullExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.expression, id);
                id
            }
            Expression::TSAsExpression(expr) => {
                let id = self.alloc(NodeKind::Other, expr.span, Some(parent));
                self.index_expression(&expr.expression, id);
                id
            }
            other => self.alloc(NodeKind::Other, other.span(), Some(parent)),
        }
    }

    fn index_call(&mut self, call: &CallExpression<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Call, call.span, Some(parent));
        let callee = self.index_expression(&call.callee, id);
        let arguments = self.index_arguments(&call.arguments, id);
        self.nodes[id.index()].detail = NodeDetail::Call { callee, arguments };
        id
    }

    fn index_arguments(&mut self, arguments: &[Argument<'_>], parent: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(arguments.len());
        for argument in arguments {
            match argument.as_expression() {
                Some(expression) => ids.push(self.index_expression(expression, parent)),
                None => ids.push(self.alloc(NodeKind::Other, argument.span(), Some(parent))),
            }
        }
        ids
    }

    fn index_member(&mut self, member: &StaticMemberExpression<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Member, member.span, Some(parent));
        let object = self.index_expression(&member.object, id);
        // The property name is also indexed as an identifier leaf so
        // renaming passes see it; chain navigation goes through the detail.
        let property_id = self.alloc(NodeKind::Identifier, member.property.span, Some(id));
        self.nodes[property_id.index()].detail = NodeDetail::Identifier {
            name: member.property.name.to_string(),
        };
        self.nodes[id.index()].detail = NodeDetail::Member {
            object,
            property: member.property.name.to_string(),
        };
        id
    }

    fn index_arrow(&mut self, arrow: &ArrowFunctionExpression<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Arrow, arrow.span, Some(parent));
        let params = arrow
            .params
            .items
            .iter()
            .filter_map(param_name)
            .collect::<Vec<_>>();
        // Expression-bodied arrows index the bare expression so callers see
        // exactly what the callback evaluates to; block bodies keep the block.
        let body = if arrow.expression {
            match arrow.body.statements.first() {
                Some(Statement::ExpressionStatement(stmt)) => {
                    self.index_expression(&stmt.expression, id)
                }
                _ => self.index_function_body(&arrow.body, id),
            }
        } else {
            self.index_function_body(&arrow.body, id)
        };
        self.nodes[id.index()].detail = NodeDetail::Arrow { params, body };
        id
    }

    fn index_object(&mut self, object: &ObjectExpression<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Object, object.span, Some(parent));
        let mut properties = Vec::new();
        for property in &object.properties {
            match property {
                ObjectPropertyKind::ObjectProperty(prop) => {
                    let prop_id = self.alloc(NodeKind::Property, prop.span, Some(id));
                    let key = property_key_name(&prop.key);
                    let value = self.index_expression(&prop.value, prop_id);
                    self.nodes[prop_id.index()].detail = NodeDetail::Property {
                        key,
                        value: Some(value),
                    };
                    properties.push(prop_id);
                }
                ObjectPropertyKind::SpreadProperty(spread) => {
                    let spread_id = self.alloc(NodeKind::Other, spread.span, Some(id));
                    self.index_expression(&spread.argument, spread_id);
                }
            }
        }
        self.nodes[id.index()].detail = NodeDetail::Object { properties };
        id
    }

    fn index_string_literal(&mut self, literal: &AstStringLiteral<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::StringLiteral, literal.span, Some(parent));
        self.nodes[id.index()].detail = NodeDetail::StringLiteral {
            value: literal.value.to_string(),
        };
        id
    }

    fn index_import(&mut self, import: &ImportDeclaration<'_>, parent: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Import, import.span, Some(parent));
        let mut specifier_ids = Vec::new();
        if let Some(specifiers) = &import.specifiers {
            for specifier in specifiers {
                if let ImportDeclarationSpecifier::ImportSpecifier(named) = specifier {
                    let specifier_id =
                        self.alloc(NodeKind::ImportSpecifier, named.span, Some(id));
                    self.nodes[specifier_id.index()].detail = NodeDetail::ImportSpecifier {
                        imported: module_export_name(&named.imported),
                        local: named.local.name.to_string(),
                    };
                    specifier_ids.push(specifier_id);
                }
            }
        }
        let source = self.index_string_literal(&import.source, id);
        self.nodes[id.index()].detail = NodeDetail::Import {
            source,
            specifiers: specifier_ids,
        };
        id
    }
}

fn param_name(param: &FormalParameter<'_>) -> Option<String> {
    match &param.pattern.kind {
        oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) => {
            Some(ident.name.to_string())
        }
        _ => None,
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.to_string()),
        _ => None,
    }
}

fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}
