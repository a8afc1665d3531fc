//! Behavior of the disambiguation rules and provenance, checked through the
//! public lowering entry points

use lowering_tests::*;
use og_ast::dump::{dump_interp, dump_source_file, expr_to_string};
use og_ast::{
    ElseBranch, FileId, ForHeader, ImportAlias, InterpKind, SimpleStmtKind, SourceFile, Stmt,
    StmtKind, TopLevelKind,
};
use og_ast_lower::{LowerOptions, LoweringContext, lower_interp, lower_source_file};
use og_ast_lower::lower_source_file_with;
use og_syntax::build::*;
use og_syntax::{SyntaxKind, SyntaxNode};

fn lower_stmt(statement: SyntaxNode) -> Stmt {
    let root = interp(statement);
    match lower_interp(&root, FileId(0)).unwrap().kind {
        InterpKind::Statement(stmt) => stmt,
        InterpKind::TopLevel(item) => panic!("expected a statement, got {item:?}"),
    }
}

fn lowered_expr(primary: SyntaxNode) -> String {
    let stmt = lower_stmt(expr_stmt(expr(primary)));
    match stmt.kind {
        StmtKind::Simple(simple) => match simple.kind {
            SimpleStmtKind::Expression(expr) => expr_to_string(&expr),
            other => panic!("expected an expression statement, got {other:?}"),
        },
        other => panic!("expected a simple statement, got {other:?}"),
    }
}

#[test]
fn slice_bounds_by_shape() {
    let cases = [
        (vec![token(":")], "(slice a _ _)"),
        (vec![name("lo"), token(":")], "(slice a lo _)"),
        (vec![name("i"), token(":")], "(slice a i _)"),
        (vec![token(":"), name("hi")], "(slice a _ hi)"),
        (vec![name("lo"), token(":"), name("hi")], "(slice a lo hi)"),
        (
            vec![token(":"), name("hi"), token(":"), name("max")],
            "(slice a _ hi max)",
        ),
        (
            vec![name("lo"), token(":"), name("hi"), token(":"), name("max")],
            "(slice a lo hi max)",
        ),
    ];
    for (parts, expected) in cases {
        assert_eq!(lowered_expr(slice(name_primary("a"), parts)), expected);
    }
}

#[test]
fn suffixes_apply_in_source_order() {
    let chain = call(
        select(index(select(name_primary("a"), "b"), lit("0")), "c"),
        vec![name("d")],
    );
    assert_eq!(lowered_expr(chain), "(call (. (index (. a b) 0) c) d)");
}

#[test]
fn assignment_operators() {
    let cases = [("=", "="), (" = ", "="), ("+=", "+="), ("<<=", "<<="), ("&^=", "&^=")];
    for (op, expected) in cases {
        let stmt = lower_stmt(simple(assignment(name("x"), op, lit("1"))));
        let StmtKind::Simple(simple) = stmt.kind else {
            panic!("expected a simple statement");
        };
        let SimpleStmtKind::Assignment(assignment) = simple.kind else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.op, expected, "operator `{op}`");
    }
}

#[test]
fn inc_dec_direction() {
    for (op, increment) in [("++", true), ("--", false), (" ++", true)] {
        let stmt = lower_stmt(simple(inc_dec(name("n"), op)));
        let StmtKind::Simple(simple) = stmt.kind else {
            panic!("expected a simple statement");
        };
        let SimpleStmtKind::IncDec(inc_dec) = simple.kind else {
            panic!("expected an inc/dec statement");
        };
        assert_eq!(inc_dec.is_increment, increment, "operator `{op}`");
    }
}

#[test]
fn import_aliases() {
    let root = unit(
        "main",
        vec![import_decl(vec![
            import_spec(None, "fmt"),
            import_spec(Some(ident("str")), "strings"),
            import_spec(Some(token(".")), "math"),
            import_spec(Some(token(":")), "\"os\""),
        ])],
    );
    let file = lower_source_file(&root, FileId(0)).unwrap();
    let specs = file.import.unwrap().specs;

    let aliases: Vec<_> = specs.iter().map(|spec| spec.alias.clone()).collect();
    assert_eq!(
        aliases,
        [
            ImportAlias::Inferred,
            ImportAlias::Named("str".to_string()),
            ImportAlias::Merge,
            ImportAlias::Merge,
        ]
    );
    assert_eq!(specs[0].path.as_framed(), "\"fmt\"\n");
    assert_eq!(specs[3].path.as_framed(), "\"os\"\n");
    assert_eq!(specs[3].path.value(), "os");
}

#[test]
fn wildcard_cases_are_defaults() {
    let switch = stmt(node(
        SyntaxKind::SwitchStmt,
        vec![node(
            SyntaxKind::ExprSwitchStmt,
            vec![
                token("switch "),
                name("x"),
                token("{"),
                clause_list(
                    SyntaxKind::ExprCaseClause,
                    node(SyntaxKind::ExprSwitchCase, vec![token(" _ ")]),
                    vec![expr_stmt(name("y"))],
                ),
                token("}"),
            ],
        )],
    ));
    let StmtKind::Switch(switch) = lower_stmt(switch).kind else {
        panic!("expected a switch");
    };
    let og_ast::SwitchStmtKind::Expr(switch) = switch.kind else {
        panic!("expected an expression switch");
    };
    assert!(switch.clauses[0].is_default());
    assert!(switch.clauses[0].case.expressions().is_none());
}

#[test]
fn pointer_and_value_receivers() {
    let method = |pointer| {
        top_level(method_decl(
            "Box",
            "size",
            pointer,
            function(signature(vec![], None), vec![]),
        ))
    };
    let root = unit("main", vec![method(true), method(false)]);
    let file = lower_source_file(&root, FileId(0)).unwrap();
    let pointers: Vec<bool> = file
        .top_levels
        .iter()
        .map(|item| match &item.kind {
            TopLevelKind::Method(method) => method.receiver.is_pointer,
            other => panic!("expected a method, got {other:?}"),
        })
        .collect();
    assert_eq!(pointers, [true, false]);
}

#[test]
fn for_clause_keeps_post_without_init() {
    let stmt = lower_stmt(for_clause(
        None,
        Some(binary(name("i"), "<", lit("3"))),
        Some(simple_stmt(inc_dec(name("i"), "++"))),
        block(vec![]),
    ));
    let StmtKind::For(for_stmt) = stmt.kind else {
        panic!("expected a for statement");
    };
    let ForHeader::Clause(clause) = for_stmt.header else {
        panic!("expected a for clause");
    };
    assert!(clause.init.is_none());
    assert!(clause.condition.is_some());
    assert!(matches!(
        clause.post.map(|post| post.kind),
        Some(SimpleStmtKind::IncDec(_))
    ));
}

#[test]
fn else_statement_becomes_a_block() {
    let stmt = lower_stmt(stmt(if_stmt(
        None,
        name("ok"),
        block(vec![expr_stmt(name("a"))]),
        Some(expr_stmt(name("b"))),
    )));
    let StmtKind::If(if_stmt) = stmt.kind else {
        panic!("expected an if statement");
    };
    let Some(ElseBranch::Block(block)) = if_stmt.else_branch else {
        panic!("expected an else block");
    };
    assert_eq!(block.statements.len(), 1);
    assert_eq!(block.span, if_stmt.span);
}

#[test]
fn line_counter_ignores_newline_terminators() {
    let root = node(
        SyntaxKind::Block,
        vec![
            token("{"),
            node(
                SyntaxKind::StatementList,
                vec![
                    expr_stmt(name("a")),
                    newline(),
                    expr_stmt(name("b")),
                    semi(),
                    expr_stmt(name("c")),
                    semi(),
                ],
            ),
            token("}"),
        ],
    );
    let stmt = lower_stmt(stmt(root));
    let StmtKind::Block(block) = stmt.kind else {
        panic!("expected a block");
    };
    let lines: Vec<u32> = block.statements.iter().map(|stmt| stmt.span.line).collect();
    assert_eq!(lines, [1, 1, 2]);
}

#[test]
fn fragments_continue_line_numbering() {
    let first = interp(expr_stmt(name("a")));
    let second = interp(top_level(function_decl(
        "f",
        function(signature(vec![], None), vec![expr_stmt(name("b"))]),
    )));
    let options = LowerOptions {
        first_line: 5,
        ..LowerOptions::default()
    };

    let mut ctx = LoweringContext::with_options(FileId(2), &first, options);
    let first = ctx.lower_interp(&first).unwrap();
    let second = ctx.lower_interp(&second).unwrap();

    assert_eq!(first.span.line, 5);
    assert_eq!(second.span.line, 6);
    assert_eq!(ctx.line(), 8);
    expect_test::expect![[r#"
        func f() @6
          expr b @6
    "#]]
    .assert_eq(&dump_interp(&second));
}

#[test]
fn self_references_follow_options() {
    let options = LowerOptions {
        self_name: "self".to_string(),
        ..LowerOptions::default()
    };
    let file = lower_source_file_with(&everything(), FileId(0), options).unwrap();
    let dump = dump_source_file(&file);
    assert!(dump.contains("assign self.items = (call append self.items xs ...)"));
    assert!(dump.contains("(call fmt.Println self.count self "));
    assert!(!dump.contains("this"));
}

#[test]
fn spans_cover_their_productions() {
    let root = everything();
    let file = lower_source_file(&root, FileId(9)).unwrap();
    let declarations = root
        .children
        .iter()
        .filter(|child| child.kind == SyntaxKind::TopLevelDecl);
    for (item, node) in file.top_levels.iter().zip(declarations) {
        assert_eq!(item.span.file, FileId(9));
        assert_eq!(&root.text[item.span.range()], node.text);
    }
}

#[test]
fn lowering_is_deterministic() {
    let root = everything();
    let first = lower_source_file(&root, FileId(0)).unwrap();
    let second = lower_source_file(&root, FileId(0)).unwrap();
    assert_eq!(first, second);
    assert_eq!(dump_source_file(&first), dump_source_file(&second));
}

#[test]
fn trees_survive_json() {
    let root = everything();
    let json = serde_json::to_string(&root).unwrap();
    let parsed: SyntaxNode = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, root);

    let file = lower_source_file(&root, FileId(0)).unwrap();
    let json = serde_json::to_string(&file).unwrap();
    let restored: SourceFile = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, file);
}
