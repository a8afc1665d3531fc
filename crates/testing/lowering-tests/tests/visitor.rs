//! AST visitor traversal over lowered fixtures

use lowering_tests::{everything, load_fixture};
use og_ast::visit::{Visitor, walk_operand};
use og_ast::{FileId, Function, Operand, OperandKind, visit};
use og_ast_lower::lower_source_file;

#[derive(Default)]
struct Names(Vec<String>);

impl<'ast> Visitor<'ast> for Names {
    fn visit_operand(&mut self, operand: &'ast Operand) {
        if let OperandKind::Name(name) = &operand.kind {
            self.0.push(name.clone());
        }
        walk_operand(self, operand);
    }
}

#[derive(Default)]
struct Functions(usize);

impl<'ast> Visitor<'ast> for Functions {
    fn visit_function(&mut self, function: &'ast Function) {
        self.0 += 1;
        visit::walk_function(self, function);
    }
}

#[test]
fn operands_in_source_order() {
    let root = load_fixture("greeter").unwrap();
    let file = lower_source_file(&root, FileId(0)).unwrap();

    let mut names = Names::default();
    names.visit_source_file(&file);
    assert_eq!(
        names.0,
        ["fmt.Println", "name", "g", "i", "i", "total", "i"]
    );
}

#[test]
fn reaches_nested_functions() {
    let file = lower_source_file(&everything(), FileId(0)).unwrap();

    // four top-level, one inline struct method, two literals
    let mut functions = Functions::default();
    functions.visit_source_file(&file);
    assert_eq!(functions.0, 7);
}
