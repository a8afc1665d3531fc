//! Read-only AST traversal
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits children in source order. Primary-expression chains are walked
//! innermost first, then each suffix in the order it was written.

use crate::*;

/// AST visitor
///
/// Override the `visit_*` methods of interest and call the matching `walk_*`
/// function to keep descending.
pub trait Visitor<'ast> {
    /// Visit a source unit
    fn visit_source_file(&mut self, file: &'ast SourceFile) {
        walk_source_file(self, file);
    }

    /// Visit a top-level declaration
    fn visit_top_level(&mut self, item: &'ast TopLevel) {
        walk_top_level(self, item);
    }

    /// Visit a declaration
    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        walk_declaration(self, decl);
    }

    /// Visit a function signature and body
    fn visit_function(&mut self, function: &'ast Function) {
        walk_function(self, function);
    }

    /// Visit a block
    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    /// Visit a statement
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    /// Visit a simple statement
    fn visit_simple_stmt(&mut self, stmt: &'ast SimpleStmt) {
        walk_simple_stmt(self, stmt);
    }

    /// Visit an expression
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Visit a primary expression
    fn visit_primary_expr(&mut self, primary: &'ast PrimaryExpr) {
        walk_primary_expr(self, primary);
    }

    /// Visit a suffix
    fn visit_secondary_expr(&mut self, suffix: &'ast SecondaryExpr) {
        walk_secondary_expr(self, suffix);
    }

    /// Visit an operand
    fn visit_operand(&mut self, operand: &'ast Operand) {
        walk_operand(self, operand);
    }

    /// Visit a literal
    fn visit_literal(&mut self, literal: &'ast Literal) {
        walk_literal(self, literal);
    }

    /// Visit a type
    fn visit_type(&mut self, ty: &'ast Type) {
        walk_type(self, ty);
    }
}

/// Visit every top-level declaration
pub fn walk_source_file<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, file: &'ast SourceFile) {
    for item in &file.top_levels {
        visitor.visit_top_level(item);
    }
}

/// Visit the declaration or function of a top-level item
pub fn walk_top_level<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, item: &'ast TopLevel) {
    match &item.kind {
        TopLevelKind::Declaration(decl) => visitor.visit_declaration(decl),
        TopLevelKind::Function(decl) => visitor.visit_function(&decl.function),
        TopLevelKind::Method(decl) => visitor.visit_function(&decl.function),
    }
}

/// Visit the types and values of a declaration
pub fn walk_declaration<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast Declaration) {
    match &decl.kind {
        DeclarationKind::Const(consts) => {
            for spec in &consts.specs {
                if let Some(ty) = &spec.ty {
                    visitor.visit_type(ty);
                }
                if let Some(values) = &spec.values {
                    walk_expression_list(visitor, values);
                }
            }
        }
        DeclarationKind::Type(types) => match &types.kind {
            TypeDeclKind::Specs(specs) => {
                for spec in specs {
                    visitor.visit_type(&spec.ty);
                }
            }
            TypeDeclKind::Struct(strukt) => walk_struct_type(visitor, strukt),
            TypeDeclKind::Interface(interface) => walk_interface_type(visitor, interface),
        },
        DeclarationKind::Var(vars) => {
            for spec in &vars.specs {
                if let Some(ty) = &spec.ty {
                    visitor.visit_type(ty);
                }
                match &spec.init {
                    Some(VarInit::Expressions(values)) => walk_expression_list(visitor, values),
                    Some(VarInit::Statement(stmt)) => visitor.visit_stmt(stmt),
                    None => {}
                }
            }
        }
    }
}

/// Visit the signature types, then the body
pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, function: &'ast Function) {
    walk_signature(visitor, &function.signature);
    if let Some(body) = &function.body {
        visitor.visit_block(body);
    }
}

fn walk_signature<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, signature: &'ast Signature) {
    for parameter in &signature.parameters {
        visitor.visit_type(&parameter.ty);
    }
    if let Some(result) = &signature.result {
        for ty in &result.types {
            visitor.visit_type(ty);
        }
    }
    if let Some(template) = &signature.template {
        walk_template(visitor, template);
    }
}

fn walk_template<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, template: &'ast TemplateSpec) {
    for ty in &template.types {
        visitor.visit_type(ty);
    }
}

/// Visit every statement
pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

/// Visit the children of a statement
pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Declaration(decl) => visitor.visit_declaration(decl),
        StmtKind::Simple(simple) => visitor.visit_simple_stmt(simple),
        StmtKind::Labeled(labeled) => visitor.visit_stmt(&labeled.statement),
        StmtKind::Go(go) => match &go.target {
            GoTarget::Expression(expr) => visitor.visit_expr(expr),
            GoTarget::Function(function) => visitor.visit_function(function),
        },
        StmtKind::Return(ret) => {
            if let Some(values) = &ret.values {
                walk_expression_list(visitor, values);
            }
        }
        StmtKind::Break { .. }
        | StmtKind::Continue { .. }
        | StmtKind::Goto { .. }
        | StmtKind::Fallthrough => {}
        StmtKind::If(if_stmt) => walk_if(visitor, if_stmt),
        StmtKind::Switch(switch) => match &switch.kind {
            SwitchStmtKind::Expr(switch) => {
                if let Some(init) = &switch.init {
                    visitor.visit_simple_stmt(init);
                }
                if let Some(subject) = &switch.subject {
                    visitor.visit_expr(subject);
                }
                for clause in &switch.clauses {
                    if let Some(list) = clause.case.expressions() {
                        walk_expression_list(visitor, list);
                    }
                    for stmt in &clause.statements {
                        visitor.visit_stmt(stmt);
                    }
                }
            }
            SwitchStmtKind::Type(switch) => {
                if let Some(init) = &switch.init {
                    visitor.visit_simple_stmt(init);
                }
                visitor.visit_primary_expr(&switch.guard.expr);
                for clause in &switch.clauses {
                    if let TypeSwitchCaseKind::Types(types) = &clause.case.kind {
                        for ty in types {
                            visitor.visit_type(ty);
                        }
                    }
                    for stmt in &clause.statements {
                        visitor.visit_stmt(stmt);
                    }
                }
            }
        },
        StmtKind::Select(select) => {
            for clause in &select.clauses {
                match &clause.case.kind {
                    CommCaseKind::Default => {}
                    CommCaseKind::Send(send) => walk_send(visitor, send),
                    CommCaseKind::Recv(recv) => {
                        if let Some(RecvTargets::Assign(targets)) = &recv.targets {
                            walk_expression_list(visitor, targets);
                        }
                        visitor.visit_expr(&recv.expr);
                    }
                }
                visitor.visit_block(&clause.body);
            }
        }
        StmtKind::For(for_stmt) => {
            match &for_stmt.header {
                ForHeader::Clause(clause) => {
                    if let Some(init) = &clause.init {
                        visitor.visit_simple_stmt(init);
                    }
                    if let Some(condition) = &clause.condition {
                        visitor.visit_expr(condition);
                    }
                    if let Some(post) = &clause.post {
                        visitor.visit_simple_stmt(post);
                    }
                }
                ForHeader::Range(range) => {
                    if let Some(RangeBindings::Assign(targets)) = &range.bindings {
                        walk_expression_list(visitor, targets);
                    }
                    visitor.visit_expr(&range.expr);
                }
                ForHeader::Condition(condition) => visitor.visit_expr(condition),
                ForHeader::Infinite => {}
            }
            visitor.visit_block(&for_stmt.body);
        }
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::Defer(defer) => visitor.visit_expr(&defer.expr),
    }
}

fn walk_if<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, if_stmt: &'ast IfStmt) {
    if let Some(init) = &if_stmt.init {
        visitor.visit_simple_stmt(init);
    }
    visitor.visit_expr(&if_stmt.condition);
    visitor.visit_block(&if_stmt.then_block);
    match &if_stmt.else_branch {
        Some(ElseBranch::Block(block)) => visitor.visit_block(block),
        Some(ElseBranch::If(nested)) => walk_if(visitor, nested),
        None => {}
    }
}

fn walk_send<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, send: &'ast SendStmt) {
    visitor.visit_expr(&send.channel);
    visitor.visit_expr(&send.value);
}

/// Visit the children of a simple statement
pub fn walk_simple_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast SimpleStmt) {
    match &stmt.kind {
        SimpleStmtKind::Send(send) => walk_send(visitor, send),
        SimpleStmtKind::Expression(expr) => visitor.visit_expr(expr),
        SimpleStmtKind::IncDec(inc_dec) => visitor.visit_expr(&inc_dec.expr),
        SimpleStmtKind::ShortVarDecl(decl) => {
            if let Some(values) = &decl.values {
                walk_expression_list(visitor, values);
            }
        }
        SimpleStmtKind::Assignment(assignment) => {
            walk_expression_list(visitor, &assignment.left);
            walk_expression_list(visitor, &assignment.right);
        }
        SimpleStmtKind::Empty(_) => {}
    }
}

/// Visit every expression of a list
pub fn walk_expression_list<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    list: &'ast ExpressionList,
) {
    for expr in &list.exprs {
        visitor.visit_expr(expr);
    }
}

/// Visit the operands of an expression
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Unary(unary) => walk_unary(visitor, unary),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
    }
}

fn walk_unary<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, unary: &'ast UnaryExpr) {
    let mut current = unary;
    loop {
        match &current.kind {
            UnaryExprKind::Primary(primary) => {
                visitor.visit_primary_expr(primary);
                return;
            }
            UnaryExprKind::Op { operand, .. } => current = &**operand,
        }
    }
}

/// Visit the base, then each suffix in order
pub fn walk_primary_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    primary: &'ast PrimaryExpr,
) {
    match &primary.base().kind {
        PrimaryExprKind::Operand(operand) => visitor.visit_operand(operand),
        PrimaryExprKind::Conversion(conversion) => {
            visitor.visit_type(&conversion.ty);
            visitor.visit_expr(&conversion.expr);
        }
        PrimaryExprKind::Chain { .. } => {}
    }
    for suffix in primary.suffixes() {
        visitor.visit_secondary_expr(suffix);
    }
}

/// Visit the children of a suffix
pub fn walk_secondary_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    suffix: &'ast SecondaryExpr,
) {
    match &suffix.kind {
        SecondaryExprKind::Selector(_) => {}
        SecondaryExprKind::Index(index) => visitor.visit_expr(index),
        SecondaryExprKind::Slice(slice) => {
            for bound in [slice.low(), slice.high(), slice.max()].into_iter().flatten() {
                visitor.visit_expr(bound);
            }
        }
        SecondaryExprKind::TypeAssertion(ty) => visitor.visit_type(ty),
        SecondaryExprKind::Call(arguments) => {
            if let Some(ty) = &arguments.ty {
                visitor.visit_type(ty);
            }
            if let Some(args) = &arguments.args {
                walk_expression_list(visitor, args);
            }
            if let Some(template) = &arguments.template {
                walk_template(visitor, template);
            }
        }
    }
}

/// Visit the children of an operand; names have none
pub fn walk_operand<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, operand: &'ast Operand) {
    match &operand.kind {
        OperandKind::Literal(literal) => visitor.visit_literal(literal),
        OperandKind::Name(_) | OperandKind::MethodExpr(_) => {}
        OperandKind::Paren(expr) => visitor.visit_expr(expr),
    }
}

/// Visit the children of a literal
pub fn walk_literal<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, literal: &'ast Literal) {
    match &literal.kind {
        LiteralKind::Basic(_) => {}
        LiteralKind::Composite(composite) => {
            match &composite.ty.kind {
                LiteralTypeKind::Struct(strukt) => walk_struct_type(visitor, strukt),
                LiteralTypeKind::Array(array) => {
                    visitor.visit_expr(&array.length);
                    visitor.visit_type(&array.elem);
                }
                LiteralTypeKind::Elided(elem) | LiteralTypeKind::Slice(elem) => {
                    visitor.visit_type(elem);
                }
                LiteralTypeKind::Map(map) => {
                    visitor.visit_type(&map.key);
                    visitor.visit_type(&map.value);
                }
                LiteralTypeKind::Name(_) => {}
            }
            walk_literal_value(visitor, &composite.value);
            if let Some(template) = &composite.template {
                walk_template(visitor, template);
            }
        }
        LiteralKind::Function(function) => visitor.visit_function(function),
    }
}

fn walk_literal_value<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, value: &'ast LiteralValue) {
    for keyed in &value.elements {
        match keyed.key.as_ref().map(|key| &key.kind) {
            Some(KeyKind::Expr(expr)) => visitor.visit_expr(expr),
            Some(KeyKind::Value(nested)) => walk_literal_value(visitor, nested),
            Some(KeyKind::Field(_)) | None => {}
        }
        match &keyed.element.kind {
            ElementKind::Expr(expr) => visitor.visit_expr(expr),
            ElementKind::Value(nested) => walk_literal_value(visitor, nested),
        }
    }
}

/// Visit the children of a type
pub fn walk_type<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, ty: &'ast Type) {
    match &ty.kind {
        TypeKind::Name(_) => {}
        TypeKind::Paren(inner) => visitor.visit_type(inner),
        TypeKind::Lit(lit) => match &lit.kind {
            TypeLitKind::Array(array) => {
                visitor.visit_expr(&array.length);
                visitor.visit_type(&array.elem);
            }
            TypeLitKind::Struct(strukt) => walk_struct_type(visitor, strukt),
            TypeLitKind::Pointer(inner) | TypeLitKind::Slice(inner) => visitor.visit_type(inner),
            TypeLitKind::Function(signature) => walk_signature(visitor, signature),
            TypeLitKind::Interface(interface) => walk_interface_type(visitor, interface),
            TypeLitKind::Map(map) => {
                visitor.visit_type(&map.key);
                visitor.visit_type(&map.value);
            }
            TypeLitKind::Channel { elem, .. } => visitor.visit_type(elem),
        },
    }
}

fn walk_struct_type<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, strukt: &'ast StructType) {
    for field in &strukt.fields {
        if let FieldDeclKind::Named { ty, .. } = &field.kind {
            visitor.visit_type(ty);
        }
    }
    for method in &strukt.methods {
        visitor.visit_function(&method.decl.function);
    }
}

fn walk_interface_type<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    interface: &'ast InterfaceType,
) {
    for method in &interface.methods {
        if let MethodSpecKind::Method {
            parameters, result, ..
        } = &method.kind
        {
            for parameter in parameters {
                visitor.visit_type(&parameter.ty);
            }
            if let Some(result) = result {
                for ty in &result.types {
                    visitor.visit_type(ty);
                }
            }
        }
    }
}
