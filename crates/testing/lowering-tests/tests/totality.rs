//! Every production lowers, and every guaranteed child is checked

use lowering_tests::{everything, kinds_in};
use og_ast::FileId;
use og_ast_lower::lower_source_file;
use og_syntax::{SyntaxKind, SyntaxNode};

#[test]
fn fixture_covers_every_production() {
    let kinds = kinds_in(&everything());
    let missing: Vec<_> = SyntaxKind::ALL
        .iter()
        .filter(|kind| **kind != SyntaxKind::Interp && !kinds.contains(kind))
        .collect();
    assert!(missing.is_empty(), "fixture never uses {missing:?}");
}

#[test]
fn whole_unit_lowers() {
    let file = lower_source_file(&everything(), FileId(0)).unwrap();
    assert_eq!(file.package.name, "main");
    assert_eq!(file.import.unwrap().specs.len(), 4);
    assert_eq!(file.top_levels.len(), 9);

    let lines: Vec<u32> = file.top_levels.iter().map(|item| item.span.line).collect();
    assert_eq!(lines, [4, 5, 6, 16, 19, 23, 26, 28, 29]);
}

fn remove_first(node: &mut SyntaxNode, parent: SyntaxKind, child: SyntaxKind) -> bool {
    if node.kind == parent {
        if let Some(position) = node.children.iter().position(|it| it.kind == child) {
            node.children.remove(position);
            return true;
        }
    }
    node.children
        .iter_mut()
        .any(|it| remove_first(it, parent, child))
}

#[test]
fn missing_required_child_is_a_mismatch() {
    use SyntaxKind::*;

    let cases = [
        (SourceFile, PackageClause),
        (PackageClause, Identifier),
        (ImportSpec, ImportPath),
        (ConstSpec, IdentifierList),
        (TypeSpec, Type),
        (FieldDecl, IdentifierList),
        (AnonymousField, TypeName),
        (InlineStructMethod, FunctionDecl),
        (Function, Signature),
        (MapType, ElementType),
        (ArrayLength, Expression),
        (ChannelType, ElementType),
        (Receiver, Identifier),
        (IfStmt, Expression),
        (Index, Expression),
        (SendStmt, Expression),
        (Conversion, Type),
        (TypeAssertion, Type),
        (MethodExpr, ReceiverType),
        (FunctionLit, Function),
        (LabeledStmt, Statement),
        (ForStmt, Block),
        (ExprSwitchCase, ExpressionList),
        (TypeSwitchGuard, PrimaryExpr),
        (TypeSwitchCase, TypeList),
        (CommClause, Block),
        (RecvStmt, Expression),
        (RangeClause, Expression),
        (DeferStmt, Expression),
    ];

    let root = everything();
    for (parent, child) in cases {
        let mut broken = root.clone();
        assert!(
            remove_first(&mut broken, parent, child),
            "fixture has no `{child}` under `{parent}`"
        );
        let error = lower_source_file(&broken, FileId(7)).unwrap_err();
        assert_eq!(
            error.production(),
            parent,
            "removing `{child}` from `{parent}`: {error}"
        );
        assert_eq!(error.file(), FileId(7));
    }
}

#[test]
fn unknown_top_level_production_is_a_mismatch() {
    let mut root = everything();
    root.children
        .insert(1, SyntaxNode::branch(SyntaxKind::Element, Vec::new()));

    let error = lower_source_file(&root, FileId(0)).unwrap_err();
    assert_eq!(error.production(), SyntaxKind::SourceFile);
    assert_eq!(error.detail(), "unexpected `element`");
}
