//! Mismatch reports rendered through both diagnostic backends

use lowering_tests::{function, function_decl, signature, slice, top_level, unit};
use miette::Diagnostic;
use og_ast::FileId;
use og_ast_lower::error::codespan_reporting::files::SimpleFiles;
use og_ast_lower::error::codespan_reporting::term;
use og_ast_lower::{LowerError, lower_source_file};
use og_syntax::SyntaxNode;
use og_syntax::build::{expr, expr_stmt, lit, name_primary, token};

/// `a[1:2:3:4]` in the body of `main`
fn four_segment_slice() -> (SyntaxNode, LowerError) {
    let body = expr_stmt(expr(slice(
        name_primary("a"),
        vec![
            lit("1"),
            token(":"),
            lit("2"),
            token(":"),
            lit("3"),
            token(":"),
            lit("4"),
        ],
    )));
    let root = unit(
        "main",
        vec![top_level(function_decl(
            "main",
            function(signature(vec![], None), vec![body]),
        ))],
    );
    let error = lower_source_file(&root, FileId(1)).unwrap_err();
    (root, error)
}

#[test]
fn mismatch_points_at_the_slice() {
    let (root, error) = four_segment_slice();
    assert_eq!(root.text, "!main;main:()->{a[1:2:3:4];}");
    assert_eq!(error.to_string(), "malformed `slice`: 4 colon-separated segments");
    assert_eq!(error.location().span.range(), 17..26);
    assert_eq!(error.location().line, 2);
    assert_eq!(&root.text[error.location().range()], "[1:2:3:4]");
}

#[test]
fn renders_with_codespan() {
    let (root, error) = four_segment_slice();

    let mut files = SimpleFiles::new();
    let file_id = files.add("main.og", root.text.clone());
    let diagnostic = error.to_codespan_diagnostic(file_id);

    let mut buffer = Vec::new();
    let config = term::Config::default();
    #[allow(deprecated)]
    term::emit(&mut buffer, &config, &files, &diagnostic).unwrap();
    let output = String::from_utf8(buffer).unwrap();

    assert!(output.contains("error[lower::structural_mismatch]: malformed `slice`"));
    assert!(output.contains("main.og:1:18"));
    assert!(output.contains("while lowering this `slice`"));
    assert!(output.contains("line 2"));
}

#[test]
fn exposes_miette_metadata() {
    let (_, error) = four_segment_slice();

    let code = error.code().map(|code| code.to_string());
    assert_eq!(code.as_deref(), Some("lower::structural_mismatch"));
    assert!(error.help().is_some());

    let labels: Vec<_> = error.labels().into_iter().flatten().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 17);
    assert_eq!(labels[0].len(), 9);
    assert!(error.source_code().is_some());
}
