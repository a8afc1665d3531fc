//! Production-by-production lowering
//!
//! Every function takes the context and the node of the production it is
//! named after, checks the node's kind, lowers the children the grammar
//! guarantees and builds the AST node. Provenance is taken on entry, before
//! any child is lowered.

mod expr;
mod items;
mod stmt;
mod types;

use crate::context::LoweringContext;
use crate::error::LowerResult;
use crate::options::LowerOptions;
use og_ast::{Block, ExpressionList, FileId, FileSpan, IdentifierList, Interp, SourceFile, Stmt};
use og_syntax::{SyntaxKind, SyntaxNode};

/// Lower a complete source unit with default options
pub fn lower_source_file(root: &SyntaxNode, file: FileId) -> LowerResult<SourceFile> {
    lower_source_file_with(root, file, LowerOptions::default())
}

/// Lower a complete source unit
#[tracing::instrument(level = "debug", skip(root, options), fields(root = %root.kind))]
pub fn lower_source_file_with(
    root: &SyntaxNode,
    file: FileId,
    options: LowerOptions,
) -> LowerResult<SourceFile> {
    LoweringContext::with_options(file, root, options).lower_source_file(root)
}

/// Lower one isolated fragment with default options
pub fn lower_interp(root: &SyntaxNode, file: FileId) -> LowerResult<Interp> {
    lower_interp_with(root, file, LowerOptions::default())
}

/// Lower one isolated fragment
#[tracing::instrument(level = "debug", skip(root, options), fields(root = %root.kind))]
pub fn lower_interp_with(
    root: &SyntaxNode,
    file: FileId,
    options: LowerOptions,
) -> LowerResult<Interp> {
    LoweringContext::with_options(file, root, options).lower_interp(root)
}

impl<'tree> LoweringContext<'tree> {
    /// Lower a source unit with this context's line counter
    pub fn lower_source_file(&mut self, root: &'tree SyntaxNode) -> LowerResult<SourceFile> {
        self.set_source(root);
        items::lower_source_file(self, root)
    }

    /// Lower a fragment, continuing this context's line numbering
    pub fn lower_interp(&mut self, root: &'tree SyntaxNode) -> LowerResult<Interp> {
        self.set_source(root);
        items::lower_interp(self, root)
    }
}

fn lower_identifier_list(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<IdentifierList> {
    ctx.expect_kind(node, SyntaxKind::IdentifierList)?;
    let names: IdentifierList = node
        .children_of(SyntaxKind::Identifier)
        .map(SyntaxNode::compact_text)
        .collect();
    if names.is_empty() {
        return Err(ctx.mismatch(node, "no identifiers"));
    }
    Ok(names)
}

fn lower_expression_list(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ExpressionList> {
    ctx.expect_kind(node, SyntaxKind::ExpressionList)?;
    let span = ctx.span(node);
    let exprs = node
        .children_of(SyntaxKind::Expression)
        .map(|child| expr::lower_expression(ctx, child))
        .collect::<LowerResult<Vec<_>>>()?;
    if exprs.is_empty() {
        return Err(ctx.mismatch(node, "no expressions"));
    }
    Ok(ExpressionList::new(exprs, span))
}

fn optional_identifier_list(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Option<IdentifierList>> {
    node.child(SyntaxKind::IdentifierList)
        .map(|list| lower_identifier_list(ctx, list))
        .transpose()
}

fn optional_expression_list(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Option<ExpressionList>> {
    node.child(SyntaxKind::ExpressionList)
        .map(|list| lower_expression_list(ctx, list))
        .transpose()
}

/// Body written as a block or as one bare statement
///
/// A bare statement becomes a one-statement block carrying `span`, the
/// provenance of the production that owns the body.
fn lower_body(
    ctx: &mut LoweringContext,
    body: &SyntaxNode,
    span: FileSpan,
) -> LowerResult<Block> {
    match body.kind {
        SyntaxKind::Block => stmt::lower_block(ctx, body),
        SyntaxKind::Statement => {
            let statement = stmt::lower_statement(ctx, body)?;
            Ok(single_statement_block(statement, span))
        }
        _ => Err(ctx.mismatch(body, "expected a block or a statement")),
    }
}

fn single_statement_block(statement: Stmt, span: FileSpan) -> Block {
    Block::new(vec![statement], span)
}
