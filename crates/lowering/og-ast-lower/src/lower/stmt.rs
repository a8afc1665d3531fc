//! Statements and blocks

use super::{
    expr, items, lower_body, lower_expression_list, lower_identifier_list,
    optional_expression_list, single_statement_block, types,
};
use crate::context::LoweringContext;
use crate::error::LowerResult;
use crate::heuristics;
use og_ast::{
    Assignment, Block, CommCase, CommCaseKind, CommClause, DeferStmt, ElseBranch, EmptyStmt,
    ExprCaseClause, ExprSwitchCase, ExprSwitchCaseKind, ExprSwitchStmt, ForClause, ForHeader,
    ForStmt, GoStmt, GoTarget, IfStmt, IncDecStmt, LabeledStmt, RangeBindings, RangeClause, RecvStmt, RecvTargets,
    ReturnStmt, SelectStmt, SendStmt, ShortVarDecl, SimpleStmt, SimpleStmtKind, Stmt, StmtKind,
    SwitchStmt, SwitchStmtKind, TypeCaseClause, TypeSwitchCase, TypeSwitchCaseKind,
    TypeSwitchGuard, TypeSwitchStmt,
};
use og_syntax::{SyntaxKind, SyntaxNode};
use tracing::trace;

pub(super) fn lower_block(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Block> {
    ctx.expect_kind(node, SyntaxKind::Block)?;
    let span = ctx.span(node);
    let statements = match node.child(SyntaxKind::StatementList) {
        Some(list) => lower_statement_list(ctx, list)?,
        None => Vec::new(),
    };
    Ok(Block::new(statements, span))
}

fn lower_statement_list(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Vec<Stmt>> {
    ctx.expect_kind(node, SyntaxKind::StatementList)?;
    ctx.lower_list(node, SyntaxKind::Statement, lower_statement)
}

pub(super) fn lower_statement(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Stmt> {
    ctx.expect_kind(node, SyntaxKind::Statement)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty statement"))?;
    trace!(production = %inner.kind, line = ctx.line(), "statement");

    let kind = match inner.kind {
        SyntaxKind::Declaration => StmtKind::Declaration(items::lower_declaration(ctx, inner)?),
        SyntaxKind::SimpleStmt => StmtKind::Simple(lower_simple_stmt(ctx, inner)?),
        SyntaxKind::LabeledStmt => StmtKind::Labeled(lower_labeled_stmt(ctx, inner)?),
        SyntaxKind::GoStmt => StmtKind::Go(lower_go_stmt(ctx, inner)?),
        SyntaxKind::ReturnStmt => StmtKind::Return(lower_return_stmt(ctx, inner)?),
        SyntaxKind::BreakStmt => StmtKind::Break {
            label: optional_label(inner),
        },
        SyntaxKind::ContinueStmt => StmtKind::Continue {
            label: optional_label(inner),
        },
        SyntaxKind::GotoStmt => StmtKind::Goto {
            label: ctx.identifier(inner)?,
        },
        SyntaxKind::FallthroughStmt => StmtKind::Fallthrough,
        SyntaxKind::IfStmt => StmtKind::If(Box::new(lower_if_stmt(ctx, inner)?)),
        SyntaxKind::SwitchStmt => StmtKind::Switch(Box::new(lower_switch_stmt(ctx, inner)?)),
        SyntaxKind::SelectStmt => StmtKind::Select(lower_select_stmt(ctx, inner)?),
        SyntaxKind::ForStmt => StmtKind::For(Box::new(lower_for_stmt(ctx, inner)?)),
        SyntaxKind::Block => StmtKind::Block(lower_block(ctx, inner)?),
        SyntaxKind::DeferStmt => StmtKind::Defer(lower_defer_stmt(ctx, inner)?),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(Stmt::new(kind, span))
}

fn optional_label(node: &SyntaxNode) -> Option<String> {
    node.child(SyntaxKind::Identifier)
        .map(SyntaxNode::compact_text)
}

pub(super) fn lower_simple_stmt(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<SimpleStmt> {
    ctx.expect_kind(node, SyntaxKind::SimpleStmt)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty simple statement"))?;

    let kind = match inner.kind {
        SyntaxKind::SendStmt => SimpleStmtKind::Send(lower_send_stmt(ctx, inner)?),
        SyntaxKind::Expression => SimpleStmtKind::Expression(expr::lower_expression(ctx, inner)?),
        SyntaxKind::IncDecStmt => SimpleStmtKind::IncDec(lower_inc_dec_stmt(ctx, inner)?),
        SyntaxKind::ShortVarDecl => {
            SimpleStmtKind::ShortVarDecl(lower_short_var_decl(ctx, inner)?)
        }
        SyntaxKind::Assignment => SimpleStmtKind::Assignment(lower_assignment(ctx, inner)?),
        SyntaxKind::EmptyStmt => SimpleStmtKind::Empty(EmptyStmt::new(ctx.span(inner))),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(SimpleStmt::new(kind, span))
}

fn lower_send_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<SendStmt> {
    ctx.expect_kind(node, SyntaxKind::SendStmt)?;
    let span = ctx.span(node);
    let channel = expr::lower_expression(ctx, ctx.required_nth(node, SyntaxKind::Expression, 0)?)?;
    let value = expr::lower_expression(ctx, ctx.required_nth(node, SyntaxKind::Expression, 1)?)?;
    Ok(SendStmt::new(channel, value, span))
}

fn lower_inc_dec_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<IncDecStmt> {
    let span = ctx.span(node);
    let operand = expr::lower_expression(ctx, ctx.required(node, SyntaxKind::Expression)?)?;
    let operator: String = node
        .children
        .iter()
        .filter(|child| child.is_token())
        .map(SyntaxNode::compact_text)
        .collect();
    Ok(IncDecStmt::new(
        operand,
        heuristics::is_increment(&operator),
        span,
    ))
}

fn lower_assignment(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Assignment> {
    let span = ctx.span(node);
    let left = lower_expression_list(
        ctx,
        ctx.required_nth(node, SyntaxKind::ExpressionList, 0)?,
    )?;
    let op = heuristics::normalize_assign_op(
        &ctx.required(node, SyntaxKind::AssignOp)?.compact_text(),
    );
    let right = lower_expression_list(
        ctx,
        ctx.required_nth(node, SyntaxKind::ExpressionList, 1)?,
    )?;
    Ok(Assignment::new(left, op, right, span))
}

fn lower_short_var_decl(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ShortVarDecl> {
    let span = ctx.span(node);
    let identifiers = lower_identifier_list(ctx, ctx.required(node, SyntaxKind::IdentifierList)?)?;
    let values = optional_expression_list(ctx, node)?;
    Ok(ShortVarDecl::new(identifiers, values, span))
}

fn lower_labeled_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<LabeledStmt> {
    let span = ctx.span(node);
    let label = ctx.identifier(node)?;
    let statement = lower_statement(ctx, ctx.required(node, SyntaxKind::Statement)?)?;
    Ok(LabeledStmt::new(label, statement, span))
}

fn lower_go_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<GoStmt> {
    let span = ctx.span(node);
    let target = if let Some(expression) = node.child(SyntaxKind::Expression) {
        GoTarget::Expression(expr::lower_expression(ctx, expression)?)
    } else if let Some(function) = node.child(SyntaxKind::Function) {
        GoTarget::Function(Box::new(items::lower_function(ctx, function)?))
    } else {
        return Err(ctx.mismatch(node, "missing `expression` or `function`"));
    };
    Ok(GoStmt::new(target, span))
}

fn lower_return_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ReturnStmt> {
    let span = ctx.span(node);
    Ok(ReturnStmt::new(optional_expression_list(ctx, node)?, span))
}

fn lower_defer_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<DeferStmt> {
    let span = ctx.span(node);
    let call = expr::lower_expression(ctx, ctx.required(node, SyntaxKind::Expression)?)?;
    Ok(DeferStmt::new(call, span))
}

fn find_kind(children: &[SyntaxNode], kind: SyntaxKind) -> Option<&SyntaxNode> {
    children.iter().find(|child| child.kind == kind)
}

fn find_body(children: &[SyntaxNode]) -> Option<&SyntaxNode> {
    children
        .iter()
        .find(|child| matches!(child.kind, SyntaxKind::Block | SyntaxKind::Statement))
}

/// `if [init;] cond body [else (if | body)]`
///
/// The `else` keyword splits the children, so the then body is searched
/// only before it and the else branch only after it.
fn lower_if_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<IfStmt> {
    ctx.expect_kind(node, SyntaxKind::IfStmt)?;
    let span = ctx.span(node);
    let split = node.token_position("else").unwrap_or(node.children.len());
    let (head, tail) = node.children.split_at(split);

    let init = find_kind(head, SyntaxKind::SimpleStmt)
        .map(|init| lower_simple_stmt(ctx, init))
        .transpose()?;
    let condition = find_kind(head, SyntaxKind::Expression)
        .ok_or_else(|| ctx.mismatch(node, "missing condition"))?;
    let condition = expr::lower_expression(ctx, condition)?;
    let then_body = find_body(head).ok_or_else(|| ctx.mismatch(node, "missing body"))?;
    let then_block = lower_body(ctx, then_body, span)?;

    let else_branch = match tail.iter().find(|child| !child.is_token()) {
        Some(branch) => Some(match branch.kind {
            SyntaxKind::IfStmt => ElseBranch::If(Box::new(lower_if_stmt(ctx, branch)?)),
            SyntaxKind::Block | SyntaxKind::Statement => {
                ElseBranch::Block(lower_body(ctx, branch, span)?)
            }
            other => {
                return Err(ctx.mismatch(node, format!("unexpected `{other}` after `else`")));
            }
        }),
        None if tail.is_empty() => None,
        None => return Err(ctx.mismatch(node, "missing else branch")),
    };

    Ok(IfStmt::new(init, condition, then_block, else_branch, span))
}

fn lower_switch_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<SwitchStmt> {
    let span = ctx.span(node);
    let kind = if let Some(switch) = node.child(SyntaxKind::ExprSwitchStmt) {
        SwitchStmtKind::Expr(lower_expr_switch_stmt(ctx, switch)?)
    } else if let Some(switch) = node.child(SyntaxKind::TypeSwitchStmt) {
        SwitchStmtKind::Type(lower_type_switch_stmt(ctx, switch)?)
    } else {
        return Err(ctx.mismatch(node, "missing `expr_switch_stmt` or `type_switch_stmt`"));
    };
    Ok(SwitchStmt::new(kind, span))
}

fn lower_expr_switch_stmt(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ExprSwitchStmt> {
    let span = ctx.span(node);
    let mut init = None;
    let mut subject = None;
    let mut clauses = Vec::new();
    for child in &node.children {
        match child.kind {
            SyntaxKind::SimpleStmt if init.is_none() => {
                init = Some(lower_simple_stmt(ctx, child)?);
            }
            SyntaxKind::Expression if subject.is_none() => {
                subject = Some(expr::lower_expression(ctx, child)?);
            }
            SyntaxKind::ExprCaseClause => clauses.push(lower_expr_case_clause(ctx, child)?),
            SyntaxKind::Eos | SyntaxKind::Eof => ctx.observe_eos(child),
            other if other.is_token() => {}
            other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
        }
    }
    Ok(ExprSwitchStmt::new(init, subject, clauses, span))
}

fn lower_expr_case_clause(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ExprCaseClause> {
    let span = ctx.span(node);
    let case = lower_expr_switch_case(ctx, ctx.required(node, SyntaxKind::ExprSwitchCase)?)?;
    let statements = lower_clause_statements(ctx, node)?;
    Ok(ExprCaseClause::new(case, statements, span))
}

/// The wildcard is recognized before the case's expressions are looked at
fn lower_expr_switch_case(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ExprSwitchCase> {
    let span = ctx.span(node);
    if heuristics::is_wildcard_case(&node.compact_text()) {
        return Ok(ExprSwitchCase::new(ExprSwitchCaseKind::Default, span));
    }
    let list = lower_expression_list(ctx, ctx.required(node, SyntaxKind::ExpressionList)?)?;
    Ok(ExprSwitchCase::new(ExprSwitchCaseKind::Expressions(list), span))
}

/// Statements of a case clause: a statement list, a block or one statement
fn lower_clause_statements(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Vec<Stmt>> {
    if let Some(list) = node.child(SyntaxKind::StatementList) {
        lower_statement_list(ctx, list)
    } else if let Some(block) = node.child(SyntaxKind::Block) {
        Ok(lower_block(ctx, block)?.statements)
    } else if let Some(statement) = node.child(SyntaxKind::Statement) {
        Ok(vec![lower_statement(ctx, statement)?])
    } else {
        Ok(Vec::new())
    }
}

fn lower_type_switch_stmt(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<TypeSwitchStmt> {
    let span = ctx.span(node);
    let mut init = None;
    let mut guard = None;
    let mut clauses = Vec::new();
    for child in &node.children {
        match child.kind {
            SyntaxKind::SimpleStmt if init.is_none() => {
                init = Some(lower_simple_stmt(ctx, child)?);
            }
            SyntaxKind::TypeSwitchGuard if guard.is_none() => {
                guard = Some(lower_type_switch_guard(ctx, child)?);
            }
            SyntaxKind::TypeCaseClause => clauses.push(lower_type_case_clause(ctx, child)?),
            SyntaxKind::Eos | SyntaxKind::Eof => ctx.observe_eos(child),
            other if other.is_token() => {}
            other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
        }
    }
    let guard = guard.ok_or_else(|| ctx.mismatch(node, "missing `type_switch_guard`"))?;
    Ok(TypeSwitchStmt::new(init, guard, clauses, span))
}

/// `[binding :=] primary.(type)`
fn lower_type_switch_guard(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<TypeSwitchGuard> {
    let span = ctx.span(node);
    let binding = node
        .child(SyntaxKind::Identifier)
        .map(SyntaxNode::compact_text);
    let subject = expr::lower_primary_expr(ctx, ctx.required(node, SyntaxKind::PrimaryExpr)?)?;
    Ok(TypeSwitchGuard::new(binding, subject, span))
}

fn lower_type_case_clause(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<TypeCaseClause> {
    let span = ctx.span(node);
    let case = lower_type_switch_case(ctx, ctx.required(node, SyntaxKind::TypeSwitchCase)?)?;
    let statements = lower_clause_statements(ctx, node)?;
    Ok(TypeCaseClause::new(case, statements, span))
}

fn lower_type_switch_case(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<TypeSwitchCase> {
    let span = ctx.span(node);
    if heuristics::is_wildcard_case(&node.compact_text()) {
        return Ok(TypeSwitchCase::new(TypeSwitchCaseKind::Default, span));
    }
    let list = ctx.required(node, SyntaxKind::TypeList)?;
    let types = types::lower_types(ctx, list)?;
    if types.is_empty() {
        return Err(ctx.mismatch(list, "no types"));
    }
    Ok(TypeSwitchCase::new(TypeSwitchCaseKind::Types(types), span))
}

fn lower_select_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<SelectStmt> {
    let span = ctx.span(node);
    let clauses = ctx.lower_list(node, SyntaxKind::CommClause, lower_comm_clause)?;
    Ok(SelectStmt::new(clauses, span))
}

/// Comm clause bodies are normalized to a block
fn lower_comm_clause(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<CommClause> {
    let span = ctx.span(node);
    let case = lower_comm_case(ctx, ctx.required(node, SyntaxKind::CommCase)?)?;
    let body = if let Some(block) = node.child(SyntaxKind::Block) {
        lower_block(ctx, block)?
    } else if let Some(list) = node.child(SyntaxKind::StatementList) {
        Block::new(lower_statement_list(ctx, list)?, span)
    } else if let Some(statement) = node.child(SyntaxKind::Statement) {
        single_statement_block(lower_statement(ctx, statement)?, span)
    } else {
        return Err(ctx.mismatch(node, "missing clause body"));
    };
    Ok(CommClause::new(case, body, span))
}

fn lower_comm_case(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<CommCase> {
    let span = ctx.span(node);
    if heuristics::is_wildcard_case(&node.compact_text()) {
        return Ok(CommCase::new(CommCaseKind::Default, span));
    }
    let kind = if let Some(send) = node.child(SyntaxKind::SendStmt) {
        CommCaseKind::Send(lower_send_stmt(ctx, send)?)
    } else if let Some(recv) = node.child(SyntaxKind::RecvStmt) {
        CommCaseKind::Recv(lower_recv_stmt(ctx, recv)?)
    } else {
        return Err(ctx.mismatch(node, "missing `send_stmt` or `recv_stmt`"));
    };
    Ok(CommCase::new(kind, span))
}

/// `[targets (= | :=)] <-ch`
fn lower_recv_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<RecvStmt> {
    let span = ctx.span(node);
    let targets = if let Some(list) = node.child(SyntaxKind::ExpressionList) {
        Some(RecvTargets::Assign(lower_expression_list(ctx, list)?))
    } else if let Some(list) = node.child(SyntaxKind::IdentifierList) {
        Some(RecvTargets::Define(lower_identifier_list(ctx, list)?))
    } else {
        None
    };
    let receive = expr::lower_expression(ctx, ctx.required(node, SyntaxKind::Expression)?)?;
    Ok(RecvStmt::new(targets, receive, span))
}

fn lower_for_stmt(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ForStmt> {
    ctx.expect_kind(node, SyntaxKind::ForStmt)?;
    let span = ctx.span(node);
    let header = if let Some(clause) = node.child(SyntaxKind::ForClause) {
        ForHeader::Clause(lower_for_clause(ctx, clause)?)
    } else if let Some(range) = node.child(SyntaxKind::RangeClause) {
        ForHeader::Range(lower_range_clause(ctx, range)?)
    } else if let Some(condition) = node.child(SyntaxKind::Expression) {
        ForHeader::Condition(expr::lower_expression(ctx, condition)?)
    } else {
        ForHeader::Infinite
    };
    let body = find_body(&node.children).ok_or_else(|| ctx.mismatch(node, "missing body"))?;
    let body = lower_body(ctx, body, span)?;
    Ok(ForStmt::new(header, body, span))
}

/// `[init]; [cond]; [post]`, split on the two separators
fn lower_for_clause(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ForClause> {
    let span = ctx.span(node);
    let separators: Vec<usize> = node
        .children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.is_token_text(";") || child.kind == SyntaxKind::Eos)
        .map(|(position, _)| position)
        .collect();
    let &[first, second] = separators.as_slice() else {
        return Err(ctx.mismatch(
            node,
            format!("expected two `;` separators, found {}", separators.len()),
        ));
    };

    let children = &node.children;
    let init = find_kind(&children[..first], SyntaxKind::SimpleStmt)
        .map(|init| lower_simple_stmt(ctx, init))
        .transpose()?;
    let condition = find_kind(&children[first + 1..second], SyntaxKind::Expression)
        .map(|condition| expr::lower_expression(ctx, condition))
        .transpose()?;
    let post = find_kind(&children[second + 1..], SyntaxKind::SimpleStmt)
        .map(|post| lower_simple_stmt(ctx, post))
        .transpose()?;
    Ok(ForClause::new(init, condition, post, span))
}

fn lower_range_clause(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<RangeClause> {
    let span = ctx.span(node);
    let bindings = if let Some(list) = node.child(SyntaxKind::IdentifierList) {
        Some(RangeBindings::Define(lower_identifier_list(ctx, list)?))
    } else if let Some(list) = node.child(SyntaxKind::ExpressionList) {
        Some(RangeBindings::Assign(lower_expression_list(ctx, list)?))
    } else {
        None
    };
    let ranged = expr::lower_expression(ctx, ctx.required(node, SyntaxKind::Expression)?)?;
    Ok(RangeClause::new(bindings, ranged, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use og_ast::dump::dump_block;
    use og_ast::{ExprKind, FileId};
    use og_syntax::build::*;

    fn lower(root: &SyntaxNode) -> LowerResult<Stmt> {
        let mut ctx = LoweringContext::new(FileId(0), root);
        lower_statement(&mut ctx, root)
    }

    fn call_stmt(callee: &str) -> SyntaxNode {
        expr_stmt(expr(suffixed(
            name_primary(callee),
            SyntaxKind::Arguments,
            vec![token("("), token(")")],
        )))
    }

    fn simple_stmt_node(inner: SyntaxNode) -> SyntaxNode {
        node(SyntaxKind::SimpleStmt, vec![inner])
    }

    #[test]
    fn if_body_forms_lower_alike() {
        let bare = stmt(node(
            SyntaxKind::IfStmt,
            vec![token("if"), name("x"), call_stmt("f")],
        ));
        let braced = stmt(node(
            SyntaxKind::IfStmt,
            vec![token("if"), name("x"), block(vec![call_stmt("f")])],
        ));

        let StmtKind::If(bare) = lower(&bare).unwrap().kind else {
            panic!("expected an if statement");
        };
        let StmtKind::If(braced) = lower(&braced).unwrap().kind else {
            panic!("expected an if statement");
        };
        assert_eq!(bare.then_block.statements.len(), 1);
        assert_eq!(dump_block(&bare.then_block), dump_block(&braced.then_block));
        expect![[r#"
            expr (call f) @1
        "#]]
        .assert_eq(&dump_block(&bare.then_block));
    }

    #[test]
    fn else_statement_is_kept_as_block() {
        let root = stmt(node(
            SyntaxKind::IfStmt,
            vec![
                token("if"),
                name("x"),
                block(vec![call_stmt("a")]),
                token("else"),
                call_stmt("b"),
            ],
        ));
        let StmtKind::If(statement) = lower(&root).unwrap().kind else {
            panic!("expected an if statement");
        };
        let Some(ElseBranch::Block(otherwise)) = statement.else_branch else {
            panic!("expected an else block");
        };
        assert_eq!(otherwise.statements.len(), 1);
        assert_eq!(otherwise.span, statement.span);
    }

    #[test]
    fn else_if_chains() {
        let inner_if = node(
            SyntaxKind::IfStmt,
            vec![token("if"), name("y"), block(vec![])],
        );
        let root = stmt(node(
            SyntaxKind::IfStmt,
            vec![token("if"), name("x"), block(vec![]), token("else"), inner_if],
        ));
        let StmtKind::If(statement) = lower(&root).unwrap().kind else {
            panic!("expected an if statement");
        };
        assert!(matches!(statement.else_branch, Some(ElseBranch::If(_))));
    }

    #[test]
    fn for_clause_without_init_keeps_post_in_place() {
        let post = simple_stmt_node(node(
            SyntaxKind::IncDecStmt,
            vec![name("i"), token("++")],
        ));
        let clause = node(
            SyntaxKind::ForClause,
            vec![
                token(";"),
                binary(name("i"), "<", lit("10")),
                token(";"),
                post,
            ],
        );
        let root = stmt(node(
            SyntaxKind::ForStmt,
            vec![token("for"), clause, block(vec![])],
        ));
        let StmtKind::For(statement) = lower(&root).unwrap().kind else {
            panic!("expected a for statement");
        };
        let ForHeader::Clause(clause) = statement.header else {
            panic!("expected a for clause");
        };
        assert!(clause.init.is_none());
        assert!(matches!(
            clause.condition.map(|condition| condition.kind),
            Some(ExprKind::Binary { .. })
        ));
        let post = clause.post.unwrap();
        assert!(matches!(
            post.kind,
            SimpleStmtKind::IncDec(IncDecStmt {
                is_increment: true,
                ..
            })
        ));
    }

    #[test]
    fn for_clause_needs_two_separators() {
        let clause = node(SyntaxKind::ForClause, vec![token(";"), name("x")]);
        let root = stmt(node(
            SyntaxKind::ForStmt,
            vec![token("for"), clause, block(vec![])],
        ));
        let error = lower(&root).unwrap_err();
        assert_eq!(error.production(), SyntaxKind::ForClause);
    }

    #[test]
    fn assignment_operators() {
        let assign = |op: &str| {
            simple(node(
                SyntaxKind::Assignment,
                vec![
                    expr_list(vec![name("a")]),
                    node(SyntaxKind::AssignOp, vec![token(op)]),
                    expr_list(vec![lit("1")]),
                ],
            ))
        };
        for (written, lowered) in [("=", "="), ("+=", "+="), ("<<=", "<<=")] {
            let StmtKind::Simple(SimpleStmt {
                kind: SimpleStmtKind::Assignment(assignment),
                ..
            }) = lower(&assign(written)).unwrap().kind
            else {
                panic!("expected an assignment");
            };
            assert_eq!(assignment.op, lowered);
        }
    }

    #[test]
    fn wildcard_case_is_default() {
        let clause = |case: SyntaxNode| {
            node(
                SyntaxKind::ExprCaseClause,
                vec![case, token("=>"), node(SyntaxKind::StatementList, vec![call_stmt("f"), semi()])],
            )
        };
        let switch = node(
            SyntaxKind::ExprSwitchStmt,
            vec![
                token("switch"),
                name("x"),
                token("{"),
                clause(node(
                    SyntaxKind::ExprSwitchCase,
                    vec![expr_list(vec![lit("1")])],
                )),
                clause(node(SyntaxKind::ExprSwitchCase, vec![token("_")])),
                token("}"),
            ],
        );
        let root = stmt(node(SyntaxKind::SwitchStmt, vec![switch]));
        let StmtKind::Switch(switch) = lower(&root).unwrap().kind else {
            panic!("expected a switch statement");
        };
        let SwitchStmtKind::Expr(switch) = switch.kind else {
            panic!("expected an expression switch");
        };
        assert!(switch.subject.is_some());
        assert!(!switch.clauses[0].is_default());
        assert!(switch.clauses[1].is_default());
        assert_eq!(switch.clauses[1].statements.len(), 1);
    }

    #[test]
    fn comm_clause_without_body_is_a_mismatch() {
        let clause = node(
            SyntaxKind::CommClause,
            vec![node(SyntaxKind::CommCase, vec![token("_")]), token("=>")],
        );
        let root = stmt(node(
            SyntaxKind::SelectStmt,
            vec![token("select"), token("{"), clause, token("}")],
        ));
        let error = lower(&root).unwrap_err();
        assert_eq!(error.production(), SyntaxKind::CommClause);
        assert_eq!(error.detail(), "missing clause body");
    }

    #[test]
    fn statement_list_counts_lines() {
        let list = node(
            SyntaxKind::Block,
            vec![
                token("{"),
                node(
                    SyntaxKind::StatementList,
                    vec![
                        call_stmt("a"),
                        semi(),
                        call_stmt("b"),
                        newline(),
                        call_stmt("c"),
                        semi(),
                    ],
                ),
                token("}"),
            ],
        );
        let mut ctx = LoweringContext::new(FileId(0), &list);
        let block = lower_block(&mut ctx, &list).unwrap();
        let lines: Vec<u32> = block
            .statements
            .iter()
            .map(|statement| statement.span.line)
            .collect();
        assert_eq!(lines, [1, 2, 2]);
        assert_eq!(ctx.line(), 3);
    }
}
