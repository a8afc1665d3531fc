//! Types, struct bodies and interfaces

use super::{expr, items, lower_identifier_list};
use crate::context::LoweringContext;
use crate::error::LowerResult;
use crate::heuristics;
use og_ast::{
    AnonymousField, ArrayType, FieldDecl, FieldDeclKind, InlineStructMethod, InterfaceType,
    MapType, MethodSpec, MethodSpecKind, StructType, Type, TypeKind, TypeLit, TypeLitKind,
};
use og_syntax::{SyntaxKind, SyntaxNode};

pub(super) fn lower_type(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Type> {
    ctx.expect_kind(node, SyntaxKind::Type)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty type"))?;

    let kind = match inner.kind {
        SyntaxKind::TypeName => TypeKind::Name(inner.compact_text()),
        SyntaxKind::TypeLit => TypeKind::Lit(Box::new(lower_type_lit(ctx, inner)?)),
        SyntaxKind::Type => TypeKind::Paren(Box::new(lower_type(ctx, inner)?)),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(Type::new(kind, span))
}

/// The `type` child of `node`, when present
pub(super) fn optional_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Option<Type>> {
    node.child(SyntaxKind::Type)
        .map(|ty| lower_type(ctx, ty))
        .transpose()
}

/// Every `type` child of `node`, in order
pub(super) fn lower_types(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Vec<Type>> {
    node.children_of(SyntaxKind::Type)
        .map(|ty| lower_type(ctx, ty))
        .collect()
}

fn lower_type_lit(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<TypeLit> {
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty type literal"))?;

    let kind = match inner.kind {
        SyntaxKind::ArrayType => TypeLitKind::Array(lower_array_type(ctx, inner)?),
        SyntaxKind::StructType => TypeLitKind::Struct(lower_struct_type(ctx, inner)?),
        SyntaxKind::PointerType => TypeLitKind::Pointer(Box::new(lower_type(
            ctx,
            ctx.required(inner, SyntaxKind::Type)?,
        )?)),
        SyntaxKind::FunctionType => TypeLitKind::Function(items::lower_signature(
            ctx,
            ctx.required(inner, SyntaxKind::Signature)?,
        )?),
        SyntaxKind::InterfaceType => TypeLitKind::Interface(lower_interface_type(ctx, inner)?),
        SyntaxKind::SliceType => TypeLitKind::Slice(Box::new(lower_element_type(
            ctx,
            ctx.required(inner, SyntaxKind::ElementType)?,
        )?)),
        SyntaxKind::MapType => TypeLitKind::Map(lower_map_type(ctx, inner)?),
        SyntaxKind::ChannelType => {
            let decl = ctx.required(inner, SyntaxKind::ChannelDecl)?;
            let text = decl.compact_text();
            let direction = heuristics::channel_direction(&text)
                .ok_or_else(|| ctx.mismatch(decl, format!("unknown channel form `{text}`")))?;
            let elem = lower_element_type(ctx, ctx.required(inner, SyntaxKind::ElementType)?)?;
            TypeLitKind::Channel {
                direction,
                elem: Box::new(elem),
            }
        }
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(TypeLit::new(kind, span))
}

pub(super) fn lower_array_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<ArrayType> {
    let span = ctx.span(node);
    let length = ctx.required(node, SyntaxKind::ArrayLength)?;
    let length = expr::lower_expression(ctx, ctx.required(length, SyntaxKind::Expression)?)?;
    let elem = lower_element_type(ctx, ctx.required(node, SyntaxKind::ElementType)?)?;
    Ok(ArrayType::new(length, elem, span))
}

pub(super) fn lower_element_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Type> {
    ctx.expect_kind(node, SyntaxKind::ElementType)?;
    lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)
}

/// `map[K]V`: the key is a bare type, the value an element type
pub(super) fn lower_map_type(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<MapType> {
    let span = ctx.span(node);
    let key = lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)?;
    let value = lower_element_type(ctx, ctx.required(node, SyntaxKind::ElementType)?)?;
    Ok(MapType::new(key, value, span))
}

/// A struct body line is either a field or a method
enum StructMember {
    Field(FieldDecl),
    Method(InlineStructMethod),
}

pub(super) fn lower_struct_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<StructType> {
    ctx.expect_kind(node, SyntaxKind::StructType)?;
    let span = ctx.span(node);
    let name = node.child(SyntaxKind::Identifier).map(SyntaxNode::compact_text);
    let template = node
        .child(SyntaxKind::TemplateSpec)
        .map(|template| items::lower_template_spec(ctx, template))
        .transpose()?;

    let mut fields = Vec::new();
    let mut methods = Vec::new();
    for child in &node.children {
        match child.kind {
            SyntaxKind::FieldDecl => match lower_struct_member(ctx, child)? {
                StructMember::Field(field) => fields.push(field),
                StructMember::Method(method) => methods.push(method),
            },
            SyntaxKind::Eos | SyntaxKind::Eof => ctx.observe_eos(child),
            SyntaxKind::TemplateSpec => {}
            _ if child.is_token() => {}
            other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
        }
    }

    Ok(StructType::new(name, fields, methods, template, span))
}

fn lower_struct_member(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<StructMember> {
    let span = ctx.span(node);
    if let Some(method) = node.child(SyntaxKind::InlineStructMethod) {
        return lower_inline_struct_method(ctx, method).map(StructMember::Method);
    }

    let tag = node
        .child(SyntaxKind::StringLit)
        .map(|tag| tag.text.trim().to_string());
    let kind = if let Some(anonymous) = node.child(SyntaxKind::AnonymousField) {
        FieldDeclKind::Embedded(lower_anonymous_field(ctx, anonymous)?)
    } else {
        let identifiers =
            lower_identifier_list(ctx, ctx.required(node, SyntaxKind::IdentifierList)?)?;
        let ty = lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)?;
        FieldDeclKind::Named { identifiers, ty }
    };
    Ok(StructMember::Field(FieldDecl::new(kind, tag, span)))
}

fn lower_anonymous_field(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<AnonymousField> {
    let span = ctx.span(node);
    let type_name = ctx.required(node, SyntaxKind::TypeName)?.compact_text();
    let is_pointer = heuristics::has_pointer_marker(&node.compact_text());
    Ok(AnonymousField::new(type_name, is_pointer, span))
}

/// Method written inside a struct body, `*` before its name marks a pointer receiver
fn lower_inline_struct_method(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<InlineStructMethod> {
    let span = ctx.span(node);
    let decl = ctx.required(node, SyntaxKind::FunctionDecl)?;
    let head: String = node
        .children
        .iter()
        .take_while(|child| child.kind != SyntaxKind::FunctionDecl)
        .map(SyntaxNode::compact_text)
        .collect();
    let is_pointer = heuristics::has_pointer_marker(&head);
    let decl = items::lower_function_decl(ctx, decl)?;
    Ok(InlineStructMethod::new(is_pointer, decl, span))
}

pub(super) fn lower_interface_type(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<InterfaceType> {
    ctx.expect_kind(node, SyntaxKind::InterfaceType)?;
    let span = ctx.span(node);
    let name = node.child(SyntaxKind::Identifier).map(SyntaxNode::compact_text);
    let methods = ctx.lower_list(node, SyntaxKind::MethodSpec, lower_method_spec)?;
    Ok(InterfaceType::new(name, methods, span))
}

fn lower_method_spec(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<MethodSpec> {
    let span = ctx.span(node);
    let kind = if let Some(parameters) = node.child(SyntaxKind::Parameters) {
        let name = ctx.identifier(node)?;
        let parameters = items::lower_parameters(ctx, parameters)?;
        let result = node
            .child(SyntaxKind::Result)
            .map(|result| items::lower_result(ctx, result))
            .transpose()?;
        MethodSpecKind::Method {
            name,
            parameters,
            result,
        }
    } else if let Some(type_name) = node.child(SyntaxKind::TypeName) {
        MethodSpecKind::Embedded(type_name.compact_text())
    } else {
        MethodSpecKind::Embedded(ctx.identifier(node)?)
    };
    Ok(MethodSpec::new(kind, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_ast::FileId;
    use og_ast::dump::type_to_string;
    use og_syntax::build::*;

    fn lowered(root: &SyntaxNode) -> String {
        let mut ctx = LoweringContext::new(FileId(0), root);
        type_to_string(&lower_type(&mut ctx, root).unwrap())
    }

    fn type_lit(inner: SyntaxNode) -> SyntaxNode {
        node(SyntaxKind::Type, vec![node(SyntaxKind::TypeLit, vec![inner])])
    }

    fn element(ty: SyntaxNode) -> SyntaxNode {
        node(SyntaxKind::ElementType, vec![ty])
    }

    fn channel(decl: Vec<SyntaxNode>) -> SyntaxNode {
        type_lit(node(
            SyntaxKind::ChannelType,
            vec![
                node(SyntaxKind::ChannelDecl, decl),
                element(type_name("int")),
            ],
        ))
    }

    fn struct_body(members: Vec<Vec<SyntaxNode>>) -> SyntaxNode {
        let mut children = vec![token("struct "), ident("Foo"), token("{")];
        for member in members {
            children.push(node(SyntaxKind::FieldDecl, member));
            children.push(semi());
        }
        children.push(token("}"));
        node(SyntaxKind::StructType, children)
    }

    fn empty_function_decl(method: &str) -> SyntaxNode {
        node(
            SyntaxKind::FunctionDecl,
            vec![
                ident(method),
                node(
                    SyntaxKind::Function,
                    vec![
                        node(
                            SyntaxKind::Signature,
                            vec![node(SyntaxKind::Parameters, vec![token("("), token(")")])],
                        ),
                        block(vec![expr_stmt(binary(name("n"), "*", lit("2")))]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn composite_types() {
        let slice = type_lit(node(
            SyntaxKind::SliceType,
            vec![token("[]"), element(type_name("string"))],
        ));
        let map = type_lit(node(
            SyntaxKind::MapType,
            vec![
                token("map["),
                type_name("string"),
                token("]"),
                element(slice),
            ],
        ));
        let pointer = type_lit(node(SyntaxKind::PointerType, vec![token("*"), map]));
        assert_eq!(lowered(&pointer), "*map[string][]string");

        let array = type_lit(node(
            SyntaxKind::ArrayType,
            vec![
                token("["),
                node(SyntaxKind::ArrayLength, vec![lit("4")]),
                token("]"),
                element(type_name("byte")),
            ],
        ));
        assert_eq!(lowered(&array), "[4]byte");

        let paren = node(SyntaxKind::Type, vec![token("("), type_name("T"), token(")")]);
        assert_eq!(lowered(&paren), "(T)");
    }

    #[test]
    fn channel_directions() {
        assert_eq!(lowered(&channel(vec![token("chan ")])), "chan int");
        assert_eq!(
            lowered(&channel(vec![token("chan"), token("<-")])),
            "chan<- int"
        );
        assert_eq!(
            lowered(&channel(vec![token("<-"), token("chan")])),
            "<-chan int"
        );

        let root = channel(vec![token("chan"), token("->")]);
        let mut ctx = LoweringContext::new(FileId(0), &root);
        let error = lower_type(&mut ctx, &root).unwrap_err();
        assert_eq!(error.production(), SyntaxKind::ChannelDecl);
    }

    #[test]
    fn struct_members_keep_fields_and_methods_apart() {
        let named = vec![ident_list(&["x", "y"]), token(" "), type_name("int")];
        let tagged = vec![
            ident_list(&["id"]),
            token(" "),
            type_name("string"),
            token(" "),
            SyntaxNode::token(SyntaxKind::StringLit, "`json:\"id\"`"),
        ];
        let embedded = vec![node(
            SyntaxKind::AnonymousField,
            vec![token("*"), node(SyntaxKind::TypeName, vec![ident("Base")])],
        )];
        // `*` inside the body must not make the receiver a pointer
        let value_method = vec![node(
            SyntaxKind::InlineStructMethod,
            vec![empty_function_decl("double")],
        )];
        let pointer_method = vec![node(
            SyntaxKind::InlineStructMethod,
            vec![token("*"), empty_function_decl("reset")],
        )];
        let root = struct_body(vec![named, tagged, embedded, value_method, pointer_method]);

        let mut ctx = LoweringContext::new(FileId(0), &root);
        let strukt = lower_struct_type(&mut ctx, &root).unwrap();
        assert_eq!(strukt.name.as_deref(), Some("Foo"));
        assert_eq!(strukt.fields.len(), 3);
        assert_eq!(strukt.methods.len(), 2);
        assert!(!strukt.methods[0].is_pointer);
        assert!(strukt.methods[1].is_pointer);
        assert_eq!(strukt.fields[1].tag.as_deref(), Some("`json:\"id\"`"));
        assert!(matches!(
            &strukt.fields[2].kind,
            FieldDeclKind::Embedded(field) if field.is_pointer && field.type_name == "Base"
        ));
        // Five member terminators plus one in each method body
        assert_eq!(ctx.line(), 8);
    }

    #[test]
    fn interface_method_specs() {
        let method = node(
            SyntaxKind::MethodSpec,
            vec![
                ident("Read"),
                node(
                    SyntaxKind::Parameters,
                    vec![
                        token("("),
                        node(
                            SyntaxKind::ParameterList,
                            vec![node(
                                SyntaxKind::ParameterDecl,
                                vec![ident_list(&["p"]), token(" "), type_name("bytes")],
                            )],
                        ),
                        token(")"),
                    ],
                ),
                node(SyntaxKind::Result, vec![type_name("int")]),
            ],
        );
        let embedded = node(
            SyntaxKind::MethodSpec,
            vec![node(
                SyntaxKind::TypeName,
                vec![ident("io"), token("."), ident("Closer")],
            )],
        );
        let root = type_lit(node(
            SyntaxKind::InterfaceType,
            vec![
                token("interface{"),
                method,
                semi(),
                embedded,
                semi(),
                token("}"),
            ],
        ));
        assert_eq!(lowered(&root), "interface{Read(p bytes) (int); io.Closer}");
    }
}
