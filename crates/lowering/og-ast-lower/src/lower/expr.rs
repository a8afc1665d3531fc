//! Expressions, operands and literals

use super::{items, optional_expression_list, types};
use crate::context::LoweringContext;
use crate::error::LowerResult;
use crate::heuristics;
use og_ast::{
    Arguments, CompositeLit, Conversion, Element, ElementKind, Expr, ExprKind, FileSpan, Key,
    KeyKind, KeyedElement, Literal, LiteralKind, LiteralType, LiteralTypeKind, LiteralValue,
    MethodExpr, Operand, OperandKind, PrimaryExpr, PrimaryExprKind, ReceiverType,
    ReceiverTypeKind, SecondaryExpr, SecondaryExprKind, SliceBounds, SliceExpr, Span, UnaryExpr,
    UnaryExprKind,
};
use og_syntax::{SyntaxKind, SyntaxNode};

pub(super) fn lower_expression(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Expr> {
    ctx.expect_kind(node, SyntaxKind::Expression)?;
    let span = ctx.span(node);
    if let Some(unary) = node.child(SyntaxKind::UnaryExpr) {
        return Ok(Expr::new(
            ExprKind::Unary(lower_unary_expr(ctx, unary)?),
            span,
        ));
    }

    let left = ctx.required_nth(node, SyntaxKind::Expression, 0)?;
    let op = node
        .children
        .iter()
        .find(|child| child.is_token())
        .map(SyntaxNode::compact_text)
        .ok_or_else(|| ctx.mismatch(node, "missing operator"))?;
    let right = ctx.required_nth(node, SyntaxKind::Expression, 1)?;

    let left = lower_expression(ctx, left)?;
    let right = lower_expression(ctx, right)?;
    Ok(Expr::binary(left, op, right, span))
}

fn lower_unary_expr(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<UnaryExpr> {
    ctx.expect_kind(node, SyntaxKind::UnaryExpr)?;
    let span = ctx.span(node);
    if let Some(primary) = node.child(SyntaxKind::PrimaryExpr) {
        return Ok(UnaryExpr::new(
            UnaryExprKind::Primary(lower_primary_expr(ctx, primary)?),
            span,
        ));
    }

    let op = node
        .children
        .first()
        .filter(|child| child.is_token())
        .map(SyntaxNode::compact_text)
        .ok_or_else(|| ctx.mismatch(node, "missing operator"))?;
    let operand = lower_unary_expr(ctx, ctx.required(node, SyntaxKind::UnaryExpr)?)?;
    Ok(UnaryExpr::new(
        UnaryExprKind::Op {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}

/// Lowers a primary expression and its suffix chain
///
/// The grammar nests chains to the left (`((a.b)[c]).d`), so a long chain
/// is a deep spine of `primary_expr` nodes. The spine is walked with a loop:
/// collect every level, lower the innermost operand, then wrap the suffixes
/// outward in source order.
pub(super) fn lower_primary_expr(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<PrimaryExpr> {
    ctx.expect_kind(node, SyntaxKind::PrimaryExpr)?;

    let mut levels = Vec::new();
    let mut current = node;
    while let Some(inner) = current.child(SyntaxKind::PrimaryExpr) {
        if !current.has_child(SyntaxKind::SecondaryExpr) {
            return Err(ctx.mismatch(current, "missing `secondary_expr`"));
        }
        levels.push((current, ctx.span(current)));
        current = inner;
    }

    let mut primary = lower_primary_base(ctx, current)?;
    let innermost = ctx.span(current);
    primary = apply_suffixes(ctx, primary, current, innermost)?;
    for (level, span) in levels.into_iter().rev() {
        primary = apply_suffixes(ctx, primary, level, span)?;
    }
    Ok(primary)
}

/// Operand or conversion at the bottom of a chain
fn lower_primary_base(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<PrimaryExpr> {
    let base = node
        .children
        .iter()
        .find(|child| matches!(child.kind, SyntaxKind::Operand | SyntaxKind::Conversion))
        .ok_or_else(|| ctx.mismatch(node, "missing `operand` or `conversion`"))?;
    // A suffixed node wraps the base, which then only covers its own child
    let span = if node.has_child(SyntaxKind::SecondaryExpr) {
        ctx.span(base)
    } else {
        ctx.span(node)
    };

    let kind = match base.kind {
        SyntaxKind::Operand => PrimaryExprKind::Operand(lower_operand(ctx, base)?),
        _ => PrimaryExprKind::Conversion(lower_conversion(ctx, base)?),
    };
    Ok(PrimaryExpr::new(kind, span))
}

/// Wraps `primary` in each suffix of `level`, in source order
///
/// The last wrapper takes the level's provenance; intermediate wrappers
/// span from the level's start to the end of their suffix.
fn apply_suffixes(
    ctx: &mut LoweringContext,
    mut primary: PrimaryExpr,
    level: &SyntaxNode,
    span: FileSpan,
) -> LowerResult<PrimaryExpr> {
    let suffixes: Vec<&SyntaxNode> = level.children_of(SyntaxKind::SecondaryExpr).collect();
    let last = suffixes.len().saturating_sub(1);
    for (index, suffix) in suffixes.into_iter().enumerate() {
        let secondary = lower_secondary_expr(ctx, suffix)?;
        let chain_span = if index == last {
            span
        } else {
            FileSpan {
                span: Span::new(span.span.start, suffix.span.end),
                ..span
            }
        };
        primary = PrimaryExpr::chain(primary, secondary, chain_span);
    }
    Ok(primary)
}

fn lower_secondary_expr(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<SecondaryExpr> {
    ctx.expect_kind(node, SyntaxKind::SecondaryExpr)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty suffix"))?;

    let kind = match inner.kind {
        SyntaxKind::Selector => SecondaryExprKind::Selector(ctx.identifier(inner)?),
        SyntaxKind::Index => {
            let index = lower_expression(ctx, ctx.required(inner, SyntaxKind::Expression)?)?;
            SecondaryExprKind::Index(Box::new(index))
        }
        SyntaxKind::Slice => SecondaryExprKind::Slice(lower_slice(ctx, inner)?),
        SyntaxKind::TypeAssertion => SecondaryExprKind::TypeAssertion(types::lower_type(
            ctx,
            ctx.required(inner, SyntaxKind::Type)?,
        )?),
        SyntaxKind::Arguments => SecondaryExprKind::Call(lower_arguments(ctx, inner)?),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(SecondaryExpr::new(kind, span))
}

/// Compact text of the slice's own tokens, each bound standing in as `x`
///
/// Colons inside a bound (a nested slice) never reach the shape rule.
fn slice_outline(node: &SyntaxNode) -> String {
    node.children
        .iter()
        .map(|child| {
            if child.is_token() {
                child.compact_text()
            } else {
                "x".to_string()
            }
        })
        .collect()
}

/// `[low:high]` or `[low:high:max]`, bounds mapped by the slice's text shape
fn lower_slice(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<SliceExpr> {
    let span = ctx.span(node);
    let text = node.compact_text();
    let outline = slice_outline(node);
    let shape = heuristics::slice_shape(&outline).ok_or_else(|| {
        ctx.mismatch(
            node,
            format!("{} colon-separated segments", outline.split(':').count()),
        )
    })?;

    let capacity = 1 + usize::from(shape.three_bound) + usize::from(shape.has_low);
    let exprs: Vec<&SyntaxNode> = node.children_of(SyntaxKind::Expression).collect();
    if exprs.len() > capacity {
        return Err(ctx.mismatch(
            node,
            format!("{} sub-expressions do not fit `{text}`", exprs.len()),
        ));
    }
    let mut bounds = exprs
        .into_iter()
        .map(|bound| lower_expression(ctx, bound).map(Box::new))
        .collect::<LowerResult<Vec<_>>>()?
        .into_iter();

    let missing = || ctx.mismatch(node, format!("missing bound in `{text}`"));
    let low = if shape.has_low {
        Some(bounds.next().ok_or_else(&missing)?)
    } else {
        None
    };
    let bounds = if shape.three_bound {
        SliceBounds::ThreeBound {
            low,
            high: bounds.next().ok_or_else(&missing)?,
            max: bounds.next().ok_or_else(&missing)?,
        }
    } else {
        SliceBounds::TwoBound {
            low,
            high: bounds.next(),
        }
    };
    Ok(SliceExpr::new(bounds, span))
}

fn lower_arguments(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Arguments> {
    let span = ctx.span(node);
    let template = node
        .child(SyntaxKind::TemplateSpec)
        .map(|template| items::lower_template_spec(ctx, template))
        .transpose()?;
    let ty = types::optional_type(ctx, node)?;
    let args = optional_expression_list(ctx, node)?;
    let is_variadic = node.has_child(SyntaxKind::RestOp) || node.token_position("...").is_some();
    Ok(Arguments::new(ty, args, is_variadic, template, span))
}

fn lower_operand(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Operand> {
    ctx.expect_kind(node, SyntaxKind::Operand)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty operand"))?;

    let kind = match inner.kind {
        SyntaxKind::Literal => OperandKind::Literal(lower_literal(ctx, inner)?),
        SyntaxKind::OperandName => OperandKind::Name(lower_operand_name(ctx, inner)?),
        SyntaxKind::MethodExpr => OperandKind::MethodExpr(lower_method_expr(ctx, inner)?),
        SyntaxKind::Expression => OperandKind::Paren(Box::new(lower_expression(ctx, inner)?)),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(Operand::new(kind, span))
}

/// Plain, self-referencing or qualified name
fn lower_operand_name(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<String> {
    if node.has_child(SyntaxKind::This) {
        return Ok(ctx.self_name().to_string());
    }
    if let Some(qualified) = node.child(SyntaxKind::QualifiedIdent) {
        return lower_qualified_ident(ctx, qualified);
    }
    ctx.identifier(node)
}

/// `@field` becomes `<self>.field`, `pkg.Name` stays as written
fn lower_qualified_ident(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<String> {
    let first = ctx.nth_identifier(node, 0)?;
    if node.has_child(SyntaxKind::This) {
        return Ok(format!("{}.{first}", ctx.self_name()));
    }
    let second = ctx.nth_identifier(node, 1)?;
    Ok(format!("{first}.{second}"))
}

fn lower_method_expr(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<MethodExpr> {
    let span = ctx.span(node);
    let receiver = lower_receiver_type(ctx, ctx.required(node, SyntaxKind::ReceiverType)?)?;
    let name = ctx.identifier(node)?;
    Ok(MethodExpr::new(receiver, name, span))
}

/// `T`, `*T` or `(inner)`; only this level's own tokens mark a pointer
fn lower_receiver_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ReceiverType> {
    let span = ctx.span(node);
    let marker: String = node
        .children
        .iter()
        .filter(|child| child.is_token())
        .map(SyntaxNode::compact_text)
        .collect();
    let is_pointer = heuristics::has_pointer_marker(&marker);
    let kind = if let Some(name) = node.child(SyntaxKind::TypeName) {
        ReceiverTypeKind::Name(name.compact_text())
    } else if let Some(nested) = node.child(SyntaxKind::ReceiverType) {
        ReceiverTypeKind::Nested(Box::new(lower_receiver_type(ctx, nested)?))
    } else {
        return Err(ctx.mismatch(node, "missing `type_name` or `receiver_type`"));
    };
    Ok(ReceiverType::new(is_pointer, kind, span))
}

fn lower_conversion(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Conversion> {
    let span = ctx.span(node);
    let ty = types::lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)?;
    let value = lower_expression(ctx, ctx.required(node, SyntaxKind::Expression)?)?;
    Ok(Conversion::new(ty, value, span))
}

fn lower_literal(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Literal> {
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty literal"))?;

    let kind = match inner.kind {
        SyntaxKind::BasicLit => LiteralKind::Basic(inner.text.trim().to_string()),
        SyntaxKind::CompositeLit => {
            LiteralKind::Composite(Box::new(lower_composite_lit(ctx, inner)?))
        }
        SyntaxKind::FunctionLit => {
            let function = ctx.required(inner, SyntaxKind::Function)?;
            LiteralKind::Function(Box::new(items::lower_function(ctx, function)?))
        }
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(Literal::new(kind, span))
}

fn lower_composite_lit(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<CompositeLit> {
    let span = ctx.span(node);
    let ty = lower_literal_type(ctx, ctx.required(node, SyntaxKind::LiteralType)?)?;
    let template = node
        .child(SyntaxKind::TemplateSpec)
        .map(|template| items::lower_template_spec(ctx, template))
        .transpose()?;
    let value = lower_literal_value(ctx, ctx.required(node, SyntaxKind::LiteralValue)?)?;
    Ok(CompositeLit::new(ty, value, template, span))
}

fn lower_literal_type(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<LiteralType> {
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty literal type"))?;

    let kind = match inner.kind {
        SyntaxKind::StructType => LiteralTypeKind::Struct(types::lower_struct_type(ctx, inner)?),
        SyntaxKind::ArrayType => LiteralTypeKind::Array(types::lower_array_type(ctx, inner)?),
        // `[...]T`
        SyntaxKind::ElementType => {
            LiteralTypeKind::Elided(types::lower_element_type(ctx, inner)?)
        }
        SyntaxKind::SliceType => LiteralTypeKind::Slice(types::lower_element_type(
            ctx,
            ctx.required(inner, SyntaxKind::ElementType)?,
        )?),
        SyntaxKind::MapType => LiteralTypeKind::Map(types::lower_map_type(ctx, inner)?),
        SyntaxKind::TypeName => LiteralTypeKind::Name(inner.compact_text()),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(LiteralType::new(kind, span))
}

fn lower_literal_value(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<LiteralValue> {
    ctx.expect_kind(node, SyntaxKind::LiteralValue)?;
    let span = ctx.span(node);
    let elements = match node.child(SyntaxKind::ElementList) {
        Some(list) => ctx.lower_list(list, SyntaxKind::KeyedElement, lower_keyed_element)?,
        None => Vec::new(),
    };
    Ok(LiteralValue::new(elements, span))
}

fn lower_keyed_element(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<KeyedElement> {
    let span = ctx.span(node);
    let key = node
        .child(SyntaxKind::Key)
        .map(|key| lower_key(ctx, key))
        .transpose()?;
    let element = lower_element(ctx, ctx.required(node, SyntaxKind::Element)?)?;
    Ok(KeyedElement::new(key, element, span))
}

fn lower_key(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Key> {
    let span = ctx.span(node);
    let kind = if let Some(field) = node.child(SyntaxKind::Identifier) {
        KeyKind::Field(field.compact_text())
    } else if let Some(expression) = node.child(SyntaxKind::Expression) {
        KeyKind::Expr(lower_expression(ctx, expression)?)
    } else if let Some(value) = node.child(SyntaxKind::LiteralValue) {
        KeyKind::Value(lower_literal_value(ctx, value)?)
    } else {
        return Err(ctx.mismatch(node, "empty key"));
    };
    Ok(Key::new(kind, span))
}

fn lower_element(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Element> {
    let span = ctx.span(node);
    let kind = if let Some(expression) = node.child(SyntaxKind::Expression) {
        ElementKind::Expr(lower_expression(ctx, expression)?)
    } else if let Some(value) = node.child(SyntaxKind::LiteralValue) {
        ElementKind::Value(lower_literal_value(ctx, value)?)
    } else {
        return Err(ctx.mismatch(node, "empty element"));
    };
    Ok(Element::new(kind, span))
}
