//! Source units, imports and declarations

use super::{
    lower_body, lower_expression_list, lower_identifier_list, optional_expression_list, stmt,
    types,
};
use crate::context::LoweringContext;
use crate::error::LowerResult;
use crate::heuristics;
use og_ast::{
    ConstDecl, ConstSpec, Declaration, DeclarationKind, Function, FunctionDecl, Import,
    ImportAlias, ImportPath, ImportSpec, Interp, InterpKind, MethodDecl, Package, Parameter,
    Receiver, Results, Signature, SourceFile, TemplateSpec, TopLevel, TopLevelKind, TypeDecl,
    TypeDeclKind, TypeSpec, VarDecl, VarInit, VarSpec,
};
use og_syntax::{SyntaxKind, SyntaxNode};
use tracing::trace;

pub(super) fn lower_source_file(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<SourceFile> {
    ctx.expect_kind(node, SyntaxKind::SourceFile)?;
    let span = ctx.span(node);

    let mut package = None;
    let mut import: Option<Import> = None;
    let mut top_levels = Vec::new();
    for child in &node.children {
        match child.kind {
            SyntaxKind::PackageClause if package.is_none() => {
                package = Some(lower_package_clause(ctx, child)?);
            }
            SyntaxKind::ImportDecl => {
                let decl = lower_import_decl(ctx, child)?;
                import = Some(match import.take() {
                    Some(merged) => merge_imports(merged, decl),
                    None => decl,
                });
            }
            SyntaxKind::TopLevelDecl => top_levels.push(lower_top_level_decl(ctx, child)?),
            SyntaxKind::Eos | SyntaxKind::Eof => ctx.observe_eos(child),
            other if other.is_token() => {}
            other => {
                return Err(ctx.mismatch(node, format!("unexpected `{other}`")));
            }
        }
    }

    let package = package.ok_or_else(|| ctx.mismatch(node, "missing `package_clause`"))?;
    Ok(SourceFile::new(package, import, top_levels, span))
}

/// Later import declarations extend the first one
fn merge_imports(mut merged: Import, next: Import) -> Import {
    merged.specs.extend(next.specs);
    merged.span.span = merged.span.span.cover(next.span.span);
    merged
}

pub(super) fn lower_interp(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Interp> {
    ctx.expect_kind(node, SyntaxKind::Interp)?;
    let span = ctx.span(node);

    let mut lowered = None;
    for child in &node.children {
        match child.kind {
            SyntaxKind::Statement if lowered.is_none() => {
                lowered = Some(InterpKind::Statement(stmt::lower_statement(ctx, child)?));
            }
            SyntaxKind::TopLevelDecl if lowered.is_none() => {
                lowered = Some(InterpKind::TopLevel(lower_top_level_decl(ctx, child)?));
            }
            SyntaxKind::Eos | SyntaxKind::Eof => ctx.observe_eos(child),
            other if other.is_token() => {}
            other => {
                return Err(ctx.mismatch(node, format!("unexpected `{other}`")));
            }
        }
    }

    let kind = lowered.ok_or_else(|| {
        ctx.mismatch(node, "expected a statement or a top-level declaration")
    })?;
    Ok(Interp::new(kind, span))
}

fn lower_package_clause(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Package> {
    ctx.expect_kind(node, SyntaxKind::PackageClause)?;
    Ok(Package::new(ctx.identifier(node)?, ctx.span(node)))
}

fn lower_import_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Import> {
    ctx.expect_kind(node, SyntaxKind::ImportDecl)?;
    let span = ctx.span(node);
    let list = node.child(SyntaxKind::ImportBody).unwrap_or(node);
    let specs = ctx.lower_list(list, SyntaxKind::ImportSpec, lower_import_spec)?;
    Ok(Import::new(specs, span))
}

fn lower_import_spec(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ImportSpec> {
    ctx.expect_kind(node, SyntaxKind::ImportSpec)?;
    let span = ctx.span(node);
    let path_node = ctx.required(node, SyntaxKind::ImportPath)?;
    let path = ImportPath::frame(path_node.text.trim());

    let alias = match node.child(SyntaxKind::Identifier) {
        Some(alias) => ImportAlias::Named(alias.compact_text()),
        None => {
            let outside_path: String = node
                .children
                .iter()
                .filter(|child| child.kind != SyntaxKind::ImportPath)
                .map(SyntaxNode::compact_text)
                .collect();
            if heuristics::has_merge_marker(&outside_path) {
                ImportAlias::Merge
            } else {
                ImportAlias::Inferred
            }
        }
    };

    Ok(ImportSpec::new(path, alias, span))
}

fn lower_top_level_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<TopLevel> {
    ctx.expect_kind(node, SyntaxKind::TopLevelDecl)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty top-level declaration"))?;
    trace!(production = %inner.kind, line = ctx.line(), "top-level declaration");

    let kind = match inner.kind {
        SyntaxKind::Declaration => TopLevelKind::Declaration(lower_declaration(ctx, inner)?),
        SyntaxKind::FunctionDecl => TopLevelKind::Function(lower_function_decl(ctx, inner)?),
        SyntaxKind::MethodDecl => TopLevelKind::Method(lower_method_decl(ctx, inner)?),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(TopLevel::new(kind, span))
}

pub(super) fn lower_declaration(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Declaration> {
    ctx.expect_kind(node, SyntaxKind::Declaration)?;
    let span = ctx.span(node);
    let inner = node
        .first_production()
        .ok_or_else(|| ctx.mismatch(node, "empty declaration"))?;

    let kind = match inner.kind {
        SyntaxKind::ConstDecl => DeclarationKind::Const(lower_const_decl(ctx, inner)?),
        SyntaxKind::TypeDecl => DeclarationKind::Type(lower_type_decl(ctx, inner)?),
        SyntaxKind::VarDecl => DeclarationKind::Var(lower_var_decl(ctx, inner)?),
        other => return Err(ctx.mismatch(node, format!("unexpected `{other}`"))),
    };
    Ok(Declaration::new(kind, span))
}

fn lower_const_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ConstDecl> {
    let span = ctx.span(node);
    let specs = ctx.lower_list(node, SyntaxKind::ConstSpec, lower_const_spec)?;
    Ok(ConstDecl::new(specs, span))
}

fn lower_const_spec(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<ConstSpec> {
    let span = ctx.span(node);
    let identifiers = lower_identifier_list(ctx, ctx.required(node, SyntaxKind::IdentifierList)?)?;
    let ty = types::optional_type(ctx, node)?;
    let values = optional_expression_list(ctx, node)?;
    Ok(ConstSpec::new(identifiers, ty, values, span))
}

fn lower_type_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<TypeDecl> {
    let span = ctx.span(node);
    let kind = if let Some(structure) = node.child(SyntaxKind::StructType) {
        TypeDeclKind::Struct(types::lower_struct_type(ctx, structure)?)
    } else if let Some(interface) = node.child(SyntaxKind::InterfaceType) {
        TypeDeclKind::Interface(types::lower_interface_type(ctx, interface)?)
    } else {
        TypeDeclKind::Specs(ctx.lower_list(node, SyntaxKind::TypeSpec, lower_type_spec)?)
    };
    Ok(TypeDecl::new(kind, span))
}

fn lower_type_spec(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<TypeSpec> {
    let span = ctx.span(node);
    let name = ctx.identifier(node)?;
    let ty = types::lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)?;
    Ok(TypeSpec::new(name, ty, span))
}

fn lower_var_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<VarDecl> {
    let span = ctx.span(node);
    let specs = ctx.lower_list(node, SyntaxKind::VarSpec, lower_var_spec)?;
    Ok(VarDecl::new(specs, span))
}

fn lower_var_spec(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<VarSpec> {
    let span = ctx.span(node);
    let identifiers = lower_identifier_list(ctx, ctx.required(node, SyntaxKind::IdentifierList)?)?;
    let ty = types::optional_type(ctx, node)?;

    let init = if let Some(values) = node.child(SyntaxKind::ExpressionList) {
        Some(VarInit::Expressions(lower_expression_list(ctx, values)?))
    } else if let Some(statement) = node.child(SyntaxKind::Statement) {
        Some(VarInit::Statement(Box::new(stmt::lower_statement(
            ctx, statement,
        )?)))
    } else {
        None
    };

    Ok(VarSpec::new(identifiers, ty, init, span))
}

pub(super) fn lower_function_decl(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<FunctionDecl> {
    ctx.expect_kind(node, SyntaxKind::FunctionDecl)?;
    let span = ctx.span(node);
    let name = ctx.identifier(node)?;
    let function = lower_function_or_signature(ctx, node)?;
    Ok(FunctionDecl::new(name, function, span))
}

fn lower_method_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<MethodDecl> {
    ctx.expect_kind(node, SyntaxKind::MethodDecl)?;
    let span = ctx.span(node);
    let receiver = lower_receiver(ctx, ctx.required(node, SyntaxKind::Receiver)?)?;
    let function = lower_function_or_signature(ctx, node)?;
    Ok(MethodDecl::new(receiver, function, span))
}

/// A declaration either carries a full function or only its signature
fn lower_function_or_signature(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Function> {
    if let Some(function) = node.child(SyntaxKind::Function) {
        return lower_function(ctx, function);
    }
    let signature = node
        .child(SyntaxKind::Signature)
        .ok_or_else(|| ctx.mismatch(node, "missing `function` or `signature`"))?;
    let span = ctx.span(signature);
    Ok(Function::new(lower_signature(ctx, signature)?, None, span))
}

/// `Owner::method` or `*Owner::method`
fn lower_receiver(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Receiver> {
    ctx.expect_kind(node, SyntaxKind::Receiver)?;
    let span = ctx.span(node);
    let owner = ctx.nth_identifier(node, 0)?;
    let method = ctx.nth_identifier(node, 1)?;
    let is_pointer = heuristics::has_pointer_marker(&node.compact_text());
    Ok(Receiver::new(owner, is_pointer, method, span))
}

pub(super) fn lower_function(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Function> {
    ctx.expect_kind(node, SyntaxKind::Function)?;
    let span = ctx.span(node);
    let signature = lower_signature(ctx, ctx.required(node, SyntaxKind::Signature)?)?;
    let body = node
        .children
        .iter()
        .find(|child| matches!(child.kind, SyntaxKind::Block | SyntaxKind::Statement))
        .map(|body| lower_body(ctx, body, span))
        .transpose()?;
    Ok(Function::new(signature, body, span))
}

pub(super) fn lower_signature(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Signature> {
    ctx.expect_kind(node, SyntaxKind::Signature)?;
    let span = ctx.span(node);
    let template = node
        .child(SyntaxKind::TemplateSpec)
        .map(|template| lower_template_spec(ctx, template))
        .transpose()?;
    let parameters = match node.child(SyntaxKind::Parameters) {
        Some(parameters) => lower_parameters(ctx, parameters)?,
        None => Vec::new(),
    };
    let result = node
        .child(SyntaxKind::Result)
        .map(|result| lower_result(ctx, result))
        .transpose()?;
    Ok(Signature::new(parameters, result, template, span))
}

pub(super) fn lower_parameters(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<Vec<Parameter>> {
    ctx.expect_kind(node, SyntaxKind::Parameters)?;
    match node.child(SyntaxKind::ParameterList) {
        Some(list) => ctx.lower_list(list, SyntaxKind::ParameterDecl, lower_parameter_decl),
        None => Ok(Vec::new()),
    }
}

fn lower_parameter_decl(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Parameter> {
    let span = ctx.span(node);
    let identifiers = super::optional_identifier_list(ctx, node)?;
    let is_variadic = node.has_child(SyntaxKind::RestOp) || node.token_position("...").is_some();
    let ty = types::lower_type(ctx, ctx.required(node, SyntaxKind::Type)?)?;
    Ok(Parameter::new(identifiers, ty, is_variadic, span))
}

/// Result types, written as bare types or as a parenthesized parameter list
pub(super) fn lower_result(ctx: &mut LoweringContext, node: &SyntaxNode) -> LowerResult<Results> {
    ctx.expect_kind(node, SyntaxKind::Result)?;
    let span = ctx.span(node);
    let types = match node.child(SyntaxKind::Parameters) {
        Some(parameters) => lower_parameters(ctx, parameters)?
            .into_iter()
            .map(|parameter| parameter.ty)
            .collect(),
        None => types::lower_types(ctx, node)?,
    };
    if types.is_empty() {
        return Err(ctx.mismatch(node, "no result types"));
    }
    Ok(Results::new(types, span))
}

/// `<T, U>`, either wrapping a result production or listing types directly
pub(super) fn lower_template_spec(
    ctx: &mut LoweringContext,
    node: &SyntaxNode,
) -> LowerResult<TemplateSpec> {
    ctx.expect_kind(node, SyntaxKind::TemplateSpec)?;
    let span = ctx.span(node);
    let types = match node.child(SyntaxKind::Result) {
        Some(result) => lower_result(ctx, result)?.types,
        None => types::lower_types(ctx, node)?,
    };
    if types.is_empty() {
        return Err(ctx.mismatch(node, "no template types"));
    }
    Ok(TemplateSpec::new(types, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_ast::FileId;
    use og_syntax::build::*;

    fn lower_file(root: &SyntaxNode) -> LowerResult<SourceFile> {
        let mut ctx = LoweringContext::new(FileId(0), root);
        lower_source_file(&mut ctx, root)
    }

    fn package(name: &str) -> SyntaxNode {
        node(SyntaxKind::PackageClause, vec![token("!"), ident(name)])
    }

    fn import_spec(children: Vec<SyntaxNode>) -> SyntaxNode {
        node(SyntaxKind::ImportSpec, children)
    }

    fn path(text: &str) -> SyntaxNode {
        node(SyntaxKind::ImportPath, vec![token(text)])
    }

    fn import_decl(specs: Vec<SyntaxNode>) -> SyntaxNode {
        let mut body = Vec::new();
        for spec in specs {
            body.push(spec);
            body.push(newline());
        }
        node(
            SyntaxKind::ImportDecl,
            vec![
                token("import"),
                token("("),
                node(SyntaxKind::ImportBody, body),
                token(")"),
            ],
        )
    }

    fn signature() -> SyntaxNode {
        node(
            SyntaxKind::Signature,
            vec![node(SyntaxKind::Parameters, vec![token("("), token(")")])],
        )
    }

    #[test]
    fn import_aliases() {
        let root = node(
            SyntaxKind::SourceFile,
            vec![
                package("main"),
                semi(),
                import_decl(vec![
                    import_spec(vec![path("fmt")]),
                    import_spec(vec![ident("str"), path("\"strings\"")]),
                    import_spec(vec![path("\"os\""), token(":")]),
                ]),
                semi(),
            ],
        );
        let file = lower_file(&root).unwrap();
        let specs = &file.import.unwrap().specs;
        assert_eq!(specs[0].path.as_framed(), "\"fmt\"\n");
        assert_eq!(specs[0].alias, ImportAlias::Inferred);
        assert_eq!(specs[1].alias, ImportAlias::Named("str".to_string()));
        assert_eq!(specs[2].alias, ImportAlias::Merge);
        assert_eq!(specs[2].alias.as_str(), ".");
    }

    #[test]
    fn every_import_declaration_is_kept() {
        let root = node(
            SyntaxKind::SourceFile,
            vec![
                package("main"),
                semi(),
                import_decl(vec![import_spec(vec![path("a")])]),
                semi(),
                import_decl(vec![import_spec(vec![path("b")])]),
                semi(),
            ],
        );
        let file = lower_file(&root).unwrap();
        let paths: Vec<_> = file
            .import
            .unwrap()
            .specs
            .iter()
            .map(|spec| spec.path.value().to_string())
            .collect();
        assert_eq!(paths, ["a", "b"]);
    }

    #[test]
    fn missing_package_is_a_mismatch() {
        let root = node(SyntaxKind::SourceFile, vec![semi()]);
        let error = lower_file(&root).unwrap_err();
        assert_eq!(error.production(), SyntaxKind::SourceFile);
        assert_eq!(error.detail(), "missing `package_clause`");
    }

    #[test]
    fn pointer_receiver() {
        let method = node(
            SyntaxKind::MethodDecl,
            vec![
                node(
                    SyntaxKind::Receiver,
                    vec![token("*"), ident("Foo"), token("::"), ident("bar")],
                ),
                signature(),
            ],
        );
        let mut ctx = LoweringContext::new(FileId(0), &method);
        let method = lower_method_decl(&mut ctx, &method).unwrap();
        assert_eq!(method.receiver.owner, "Foo");
        assert_eq!(method.receiver.method, "bar");
        assert!(method.receiver.is_pointer);
        assert!(method.function.body.is_none());
    }

    #[test]
    fn function_body_statement_becomes_block() {
        let function = node(
            SyntaxKind::Function,
            vec![signature(), token("=>"), expr_stmt(name("x"))],
        );
        let decl = node(
            SyntaxKind::FunctionDecl,
            vec![token("func"), ident("f"), function],
        );
        let mut ctx = LoweringContext::new(FileId(0), &decl);
        let decl = lower_function_decl(&mut ctx, &decl).unwrap();
        let body = decl.function.body.unwrap();
        assert_eq!(body.statements.len(), 1);
        assert_eq!(body.span, decl.function.span);
    }

    #[test]
    fn variadic_parameter() {
        let parameters = node(
            SyntaxKind::Parameters,
            vec![
                token("("),
                node(
                    SyntaxKind::ParameterList,
                    vec![node(
                        SyntaxKind::ParameterDecl,
                        vec![
                            ident_list(&["args"]),
                            node(SyntaxKind::RestOp, vec![token("...")]),
                            type_name("int"),
                        ],
                    )],
                ),
                token(")"),
            ],
        );
        let mut ctx = LoweringContext::new(FileId(0), &parameters);
        let parameters = lower_parameters(&mut ctx, &parameters).unwrap();
        assert_eq!(parameters.len(), 1);
        assert!(parameters[0].is_variadic);
        assert_eq!(parameters[0].ty.as_name(), Some("int"));
    }
}
