//! Shorthand constructors for hand-built parse trees
//!
//! Used by hosts that synthesize fragments and by tests. Every helper
//! produces the exact shape the Og grammar emits for the construct it names.

use crate::{SyntaxKind, SyntaxNode};

/// Punctuation or keyword token
pub fn token(text: &str) -> SyntaxNode {
    SyntaxNode::token(SyntaxKind::Token, text)
}

/// Identifier token
pub fn ident(name: &str) -> SyntaxNode {
    SyntaxNode::token(SyntaxKind::Identifier, name)
}

/// Production with the given children
pub fn node(kind: SyntaxKind, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::branch(kind, children)
}

/// `;` terminator
pub fn semi() -> SyntaxNode {
    node(SyntaxKind::Eos, vec![token(";")])
}

/// Line-break terminator, not counted by the line counter
pub fn newline() -> SyntaxNode {
    node(SyntaxKind::Eos, vec![token("\n")])
}

/// End-of-input terminator
pub fn end_of_input() -> SyntaxNode {
    node(
        SyntaxKind::Eos,
        vec![SyntaxNode::token(SyntaxKind::Eof, "")],
    )
}

/// `primary_expr` wrapping an operand production
pub fn primary(operand: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::PrimaryExpr,
        vec![node(SyntaxKind::Operand, vec![operand])],
    )
}

/// `primary_expr` naming a variable
pub fn name_primary(name: &str) -> SyntaxNode {
    primary(node(SyntaxKind::OperandName, vec![ident(name)]))
}

/// `primary_expr` for a basic literal
pub fn literal_primary(text: &str) -> SyntaxNode {
    primary(node(
        SyntaxKind::Literal,
        vec![node(SyntaxKind::BasicLit, vec![token(text)])],
    ))
}

/// `expression` over a single primary expression
pub fn expr(primary: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::Expression,
        vec![node(SyntaxKind::UnaryExpr, vec![primary])],
    )
}

/// `expression` naming a variable
pub fn name(name: &str) -> SyntaxNode {
    expr(name_primary(name))
}

/// `expression` for a basic literal
pub fn lit(text: &str) -> SyntaxNode {
    expr(literal_primary(text))
}

/// Binary `expression`
pub fn binary(left: SyntaxNode, op: &str, right: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::Expression, vec![left, token(op), right])
}

/// `primary_expr` applying one suffix to an inner primary expression
pub fn suffixed(inner: SyntaxNode, suffix_kind: SyntaxKind, suffix: Vec<SyntaxNode>) -> SyntaxNode {
    node(
        SyntaxKind::PrimaryExpr,
        vec![
            inner,
            node(SyntaxKind::SecondaryExpr, vec![node(suffix_kind, suffix)]),
        ],
    )
}

/// `expression_list` separated by commas
pub fn expr_list(exprs: Vec<SyntaxNode>) -> SyntaxNode {
    node(SyntaxKind::ExpressionList, comma_separated(exprs))
}

/// `identifier_list` separated by commas
pub fn ident_list(names: &[&str]) -> SyntaxNode {
    node(
        SyntaxKind::IdentifierList,
        comma_separated(names.iter().map(|name| ident(name)).collect()),
    )
}

/// `type` naming a type
pub fn type_name(name: &str) -> SyntaxNode {
    node(
        SyntaxKind::Type,
        vec![node(SyntaxKind::TypeName, vec![ident(name)])],
    )
}

/// `statement` holding a simple statement production
pub fn simple(inner: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::Statement,
        vec![node(SyntaxKind::SimpleStmt, vec![inner])],
    )
}

/// `statement` holding an expression statement
pub fn expr_stmt(expression: SyntaxNode) -> SyntaxNode {
    simple(expression)
}

/// `statement` wrapping a statement production
pub fn stmt(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::Statement, vec![inner])
}

/// `block` whose statements are separated by `;`
pub fn block(statements: Vec<SyntaxNode>) -> SyntaxNode {
    let mut list = Vec::new();
    for statement in statements {
        list.push(statement);
        list.push(semi());
    }
    node(
        SyntaxKind::Block,
        vec![
            token("{"),
            node(SyntaxKind::StatementList, list),
            token("}"),
        ],
    )
}

fn comma_separated(items: Vec<SyntaxNode>) -> Vec<SyntaxNode> {
    let mut children = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            children.push(token(","));
        }
        children.push(item);
    }
    children
}
