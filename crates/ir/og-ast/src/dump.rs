//! Compact textual dump of a tree
//!
//! One line per item and statement, indented by nesting depth and suffixed
//! with the provenance line (`@3`). Expressions and types are printed inline
//! as s-expressions. The format exists for tests and debugging only.

use crate::*;
use std::fmt::Write as _;

/// Dumps a whole source unit
pub fn dump_source_file(file: &SourceFile) -> String {
    let mut dumper = Dumper::default();
    dumper.source_file(file);
    dumper.out
}

/// Dumps a fragment
pub fn dump_interp(interp: &Interp) -> String {
    let mut dumper = Dumper::default();
    match &interp.kind {
        InterpKind::Statement(stmt) => dumper.stmt(stmt),
        InterpKind::TopLevel(item) => dumper.top_level(item),
    }
    dumper.out
}

/// Dumps the statements of a block
pub fn dump_block(block: &Block) -> String {
    let mut dumper = Dumper::default();
    dumper.block_statements(block);
    dumper.out
}

/// Renders an expression as an s-expression
pub fn expr_to_string(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Unary(unary) => unary_to_string(unary),
        ExprKind::Binary { left, op, right } => {
            format!("({op} {} {})", expr_to_string(left), expr_to_string(right))
        }
    }
}

/// Renders a type in surface syntax
pub fn type_to_string(ty: &Type) -> String {
    match &ty.kind {
        TypeKind::Name(name) => name.clone(),
        TypeKind::Paren(inner) => format!("({})", type_to_string(inner)),
        TypeKind::Lit(lit) => match &lit.kind {
            TypeLitKind::Array(array) => format!(
                "[{}]{}",
                expr_to_string(&array.length),
                type_to_string(&array.elem)
            ),
            TypeLitKind::Struct(strukt) => struct_to_string(strukt),
            TypeLitKind::Pointer(inner) => format!("*{}", type_to_string(inner)),
            TypeLitKind::Function(signature) => format!("func{}", signature_to_string(signature)),
            TypeLitKind::Interface(interface) => interface_to_string(interface),
            TypeLitKind::Slice(elem) => format!("[]{}", type_to_string(elem)),
            TypeLitKind::Map(map) => map_to_string(map),
            TypeLitKind::Channel { direction, elem } => {
                let prefix = match direction {
                    ChannelDirection::Both => "chan ",
                    ChannelDirection::Send => "chan<- ",
                    ChannelDirection::Recv => "<-chan ",
                };
                format!("{prefix}{}", type_to_string(elem))
            }
        },
    }
}

fn unary_to_string(unary: &UnaryExpr) -> String {
    match &unary.kind {
        UnaryExprKind::Primary(primary) => primary_to_string(primary),
        UnaryExprKind::Op { op, operand } => format!("({op} {})", unary_to_string(operand)),
    }
}

fn primary_to_string(primary: &PrimaryExpr) -> String {
    let mut text = match &primary.base().kind {
        PrimaryExprKind::Operand(operand) => operand_to_string(operand),
        PrimaryExprKind::Conversion(conversion) => format!(
            "(conv {} {})",
            type_to_string(&conversion.ty),
            expr_to_string(&conversion.expr)
        ),
        PrimaryExprKind::Chain { .. } => String::new(),
    };
    for suffix in primary.suffixes() {
        text = match &suffix.kind {
            SecondaryExprKind::Selector(name) => format!("(. {text} {name})"),
            SecondaryExprKind::Index(index) => format!("(index {text} {})", expr_to_string(index)),
            SecondaryExprKind::Slice(slice) => {
                let bound = |bound: Option<&Expr>| bound.map_or_else(|| "_".to_string(), expr_to_string);
                let mut rendered = format!(
                    "(slice {text} {} {}",
                    bound(slice.low()),
                    bound(slice.high())
                );
                if slice.is_three_bound() {
                    let _ = write!(rendered, " {}", bound(slice.max()));
                }
                rendered.push(')');
                rendered
            }
            SecondaryExprKind::TypeAssertion(ty) => {
                format!("(assert {text} {})", type_to_string(ty))
            }
            SecondaryExprKind::Call(arguments) => {
                let mut rendered = format!("(call {text}");
                if let Some(template) = &arguments.template {
                    rendered.push_str(&template_to_string(template));
                }
                if let Some(ty) = &arguments.ty {
                    let _ = write!(rendered, " {}", type_to_string(ty));
                }
                if let Some(args) = &arguments.args {
                    for arg in &args.exprs {
                        let _ = write!(rendered, " {}", expr_to_string(arg));
                    }
                }
                if arguments.is_variadic {
                    rendered.push_str(" ...");
                }
                rendered.push(')');
                rendered
            }
        };
    }
    text
}

fn operand_to_string(operand: &Operand) -> String {
    match &operand.kind {
        OperandKind::Literal(literal) => literal_to_string(literal),
        OperandKind::Name(name) => name.clone(),
        OperandKind::MethodExpr(method) => {
            format!("(method {}.{})", receiver_type_to_string(&method.receiver), method.name)
        }
        OperandKind::Paren(expr) => format!("(paren {})", expr_to_string(expr)),
    }
}

fn receiver_type_to_string(receiver: &ReceiverType) -> String {
    let inner = match &receiver.kind {
        ReceiverTypeKind::Name(name) => name.clone(),
        ReceiverTypeKind::Nested(nested) => format!("({})", receiver_type_to_string(nested)),
    };
    if receiver.is_pointer {
        format!("*{inner}")
    } else {
        inner
    }
}

fn literal_to_string(literal: &Literal) -> String {
    match &literal.kind {
        LiteralKind::Basic(text) => text.clone(),
        LiteralKind::Composite(composite) => {
            let ty = match &composite.ty.kind {
                LiteralTypeKind::Struct(strukt) => struct_to_string(strukt),
                LiteralTypeKind::Array(array) => format!(
                    "[{}]{}",
                    expr_to_string(&array.length),
                    type_to_string(&array.elem)
                ),
                LiteralTypeKind::Elided(elem) => format!("[...]{}", type_to_string(elem)),
                LiteralTypeKind::Slice(elem) => format!("[]{}", type_to_string(elem)),
                LiteralTypeKind::Map(map) => map_to_string(map),
                LiteralTypeKind::Name(name) => name.clone(),
            };
            let template = composite
                .template
                .as_ref()
                .map(template_to_string)
                .unwrap_or_default();
            format!("(composite {ty}{template} {})", literal_value_to_string(&composite.value))
        }
        LiteralKind::Function(function) => {
            let statements = function.body.as_ref().map_or(0, |body| body.statements.len());
            format!("(func{} [{statements} stmts])", signature_to_string(&function.signature))
        }
    }
}

fn literal_value_to_string(value: &LiteralValue) -> String {
    let elements: Vec<_> = value
        .elements
        .iter()
        .map(|keyed| {
            let element = match &keyed.element.kind {
                ElementKind::Expr(expr) => expr_to_string(expr),
                ElementKind::Value(nested) => literal_value_to_string(nested),
            };
            match keyed.key.as_ref().map(|key| &key.kind) {
                None => element,
                Some(KeyKind::Field(name)) => format!("{name}: {element}"),
                Some(KeyKind::Expr(expr)) => format!("{}: {element}", expr_to_string(expr)),
                Some(KeyKind::Value(nested)) => {
                    format!("{}: {element}", literal_value_to_string(nested))
                }
            }
        })
        .collect();
    format!("{{{}}}", elements.join(", "))
}

fn map_to_string(map: &MapType) -> String {
    format!("map[{}]{}", type_to_string(&map.key), type_to_string(&map.value))
}

fn struct_to_string(strukt: &StructType) -> String {
    let fields: Vec<_> = strukt
        .fields
        .iter()
        .map(|field| {
            let mut text = match &field.kind {
                FieldDeclKind::Named { identifiers, ty } => {
                    format!("{} {}", identifiers.names().join(","), type_to_string(ty))
                }
                FieldDeclKind::Embedded(anonymous) => {
                    let marker = if anonymous.is_pointer { "*" } else { "" };
                    format!("{marker}{}", anonymous.type_name)
                }
            };
            if let Some(tag) = &field.tag {
                let _ = write!(text, " {tag}");
            }
            text
        })
        .chain(strukt.methods.iter().map(|method| {
            let marker = if method.is_pointer { "*" } else { "" };
            format!("{marker}{}{}", method.decl.name, signature_to_string(&method.decl.function.signature))
        }))
        .collect();
    let name = strukt.name.as_deref().map(|name| format!(" {name}")).unwrap_or_default();
    format!("struct{name}{{{}}}", fields.join("; "))
}

fn interface_to_string(interface: &InterfaceType) -> String {
    let methods: Vec<_> = interface
        .methods
        .iter()
        .map(|method| match &method.kind {
            MethodSpecKind::Method {
                name,
                parameters,
                result,
            } => format!("{name}{}", params_to_string(parameters, result.as_ref())),
            MethodSpecKind::Embedded(name) => name.clone(),
        })
        .collect();
    let name = interface
        .name
        .as_deref()
        .map(|name| format!(" {name}"))
        .unwrap_or_default();
    format!("interface{name}{{{}}}", methods.join("; "))
}

fn signature_to_string(signature: &Signature) -> String {
    let template = signature
        .template
        .as_ref()
        .map(template_to_string)
        .unwrap_or_default();
    format!(
        "{template}{}",
        params_to_string(&signature.parameters, signature.result.as_ref())
    )
}

fn params_to_string(parameters: &[Parameter], result: Option<&Results>) -> String {
    let parameters: Vec<_> = parameters
        .iter()
        .map(|parameter| {
            let rest = if parameter.is_variadic { "..." } else { "" };
            let ty = type_to_string(&parameter.ty);
            match &parameter.identifiers {
                Some(names) => format!("{} {rest}{ty}", names.names().join(",")),
                None => format!("{rest}{ty}"),
            }
        })
        .collect();
    let mut text = format!("({})", parameters.join(", "));
    if let Some(result) = result {
        let types: Vec<_> = result.types.iter().map(type_to_string).collect();
        let _ = write!(text, " ({})", types.join(", "));
    }
    text
}

fn template_to_string(template: &TemplateSpec) -> String {
    let types: Vec<_> = template.types.iter().map(type_to_string).collect();
    format!("<{}>", types.join(", "))
}

fn list_to_string(list: &ExpressionList) -> String {
    list.exprs.iter().map(expr_to_string).collect::<Vec<_>>().join(", ")
}

fn simple_to_string(simple: &SimpleStmt) -> String {
    match &simple.kind {
        SimpleStmtKind::Send(send) => format!(
            "send {} <- {}",
            expr_to_string(&send.channel),
            expr_to_string(&send.value)
        ),
        SimpleStmtKind::Expression(expr) => format!("expr {}", expr_to_string(expr)),
        SimpleStmtKind::IncDec(inc_dec) => {
            let op = if inc_dec.is_increment { "++" } else { "--" };
            format!("incdec {}{op}", expr_to_string(&inc_dec.expr))
        }
        SimpleStmtKind::ShortVarDecl(decl) => {
            let values = decl.values.as_ref().map(list_to_string).unwrap_or_default();
            format!("define {} := {values}", decl.identifiers.names().join(", "))
        }
        SimpleStmtKind::Assignment(assignment) => format!(
            "assign {} {} {}",
            list_to_string(&assignment.left),
            assignment.op,
            list_to_string(&assignment.right)
        ),
        SimpleStmtKind::Empty(_) => "empty".to_string(),
    }
}

#[derive(Default)]
struct Dumper {
    out: String,
    depth: usize,
}

impl Dumper {
    fn line(&mut self, text: &str, span: FileSpan) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        let _ = writeln!(self.out, "{text} @{}", span.line);
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    fn source_file(&mut self, file: &SourceFile) {
        self.line(&format!("package {}", file.package.name), file.package.span);
        if let Some(import) = &file.import {
            self.line("import", import.span);
            self.nested(|this| {
                for spec in &import.specs {
                    let alias = match &spec.alias {
                        ImportAlias::Named(name) => name.as_str(),
                        ImportAlias::Merge => "<merge>",
                        ImportAlias::Inferred => "<inferred>",
                    };
                    this.line(&format!("{} as {alias}", spec.path.value()), spec.span);
                }
            });
        }
        for item in &file.top_levels {
            self.top_level(item);
        }
    }

    fn top_level(&mut self, item: &TopLevel) {
        match &item.kind {
            TopLevelKind::Declaration(decl) => self.declaration(decl),
            TopLevelKind::Function(decl) => {
                let header = format!("func {}{}", decl.name, signature_to_string(&decl.function.signature));
                self.function(&header, &decl.function, item.span);
            }
            TopLevelKind::Method(decl) => {
                let receiver = &decl.receiver;
                let marker = if receiver.is_pointer { "*" } else { "" };
                let header = format!(
                    "method {marker}{}::{}{}",
                    receiver.owner,
                    receiver.method,
                    signature_to_string(&decl.function.signature)
                );
                self.function(&header, &decl.function, item.span);
            }
        }
    }

    fn function(&mut self, header: &str, function: &Function, span: FileSpan) {
        match &function.body {
            Some(body) => {
                self.line(header, span);
                self.nested(|this| this.block_statements(body));
            }
            None => self.line(&format!("{header} <extern>"), span),
        }
    }

    fn declaration(&mut self, decl: &Declaration) {
        match &decl.kind {
            DeclarationKind::Const(consts) => {
                self.line("const", decl.span);
                self.nested(|this| {
                    for spec in &consts.specs {
                        let mut text = spec.identifiers.names().join(", ");
                        if let Some(ty) = &spec.ty {
                            let _ = write!(text, " {}", type_to_string(ty));
                        }
                        if let Some(values) = &spec.values {
                            let _ = write!(text, " = {}", list_to_string(values));
                        }
                        this.line(&text, spec.span);
                    }
                });
            }
            DeclarationKind::Type(types) => match &types.kind {
                TypeDeclKind::Specs(specs) => {
                    self.line("type", decl.span);
                    self.nested(|this| {
                        for spec in specs {
                            this.line(&format!("{} = {}", spec.name, type_to_string(&spec.ty)), spec.span);
                        }
                    });
                }
                TypeDeclKind::Struct(strukt) => {
                    self.line(&format!("type {}", struct_to_string(strukt)), decl.span);
                }
                TypeDeclKind::Interface(interface) => {
                    self.line(&format!("type {}", interface_to_string(interface)), decl.span);
                }
            },
            DeclarationKind::Var(vars) => {
                self.line("var", decl.span);
                self.nested(|this| {
                    for spec in &vars.specs {
                        let mut text = spec.identifiers.names().join(", ");
                        if let Some(ty) = &spec.ty {
                            let _ = write!(text, " {}", type_to_string(ty));
                        }
                        match &spec.init {
                            Some(VarInit::Expressions(values)) => {
                                let _ = write!(text, " = {}", list_to_string(values));
                                this.line(&text, spec.span);
                            }
                            Some(VarInit::Statement(stmt)) => {
                                text.push_str(" =");
                                this.line(&text, spec.span);
                                this.nested(|this| this.stmt(stmt));
                            }
                            None => this.line(&text, spec.span),
                        }
                    }
                });
            }
        }
    }

    fn block_statements(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.stmt(stmt);
        }
    }

    fn block(&mut self, header: &str, block: &Block) {
        self.line(header, block.span);
        self.nested(|this| this.block_statements(block));
    }

    fn stmt(&mut self, stmt: &Stmt) {
        let span = stmt.span;
        match &stmt.kind {
            StmtKind::Declaration(decl) => self.declaration(decl),
            StmtKind::Simple(simple) => self.line(&simple_to_string(simple), span),
            StmtKind::Labeled(labeled) => {
                self.line(&format!("label {}", labeled.label), span);
                self.nested(|this| this.stmt(&labeled.statement));
            }
            StmtKind::Go(go) => match &go.target {
                GoTarget::Expression(expr) => self.line(&format!("go {}", expr_to_string(expr)), span),
                GoTarget::Function(function) => {
                    let header = format!("go func{}", signature_to_string(&function.signature));
                    self.function(&header, function, span);
                }
            },
            StmtKind::Return(ret) => {
                let values = ret.values.as_ref().map(list_to_string).unwrap_or_default();
                self.line(format!("return {values}").trim_end(), span);
            }
            StmtKind::Break { label } => {
                let label = label.as_deref().unwrap_or_default();
                self.line(format!("break {label}").trim_end(), span);
            }
            StmtKind::Continue { label } => {
                let label = label.as_deref().unwrap_or_default();
                self.line(format!("continue {label}").trim_end(), span);
            }
            StmtKind::Goto { label } => self.line(&format!("goto {label}"), span),
            StmtKind::Fallthrough => self.line("fallthrough", span),
            StmtKind::If(if_stmt) => self.if_stmt(if_stmt, "if"),
            StmtKind::Switch(switch) => self.switch(switch),
            StmtKind::Select(select) => {
                self.line("select", span);
                self.nested(|this| {
                    for clause in &select.clauses {
                        let header = match &clause.case.kind {
                            CommCaseKind::Default => "case _".to_string(),
                            CommCaseKind::Send(send) => format!(
                                "case send {} <- {}",
                                expr_to_string(&send.channel),
                                expr_to_string(&send.value)
                            ),
                            CommCaseKind::Recv(recv) => {
                                let targets = match &recv.targets {
                                    Some(RecvTargets::Assign(list)) => format!("{} = ", list_to_string(list)),
                                    Some(RecvTargets::Define(names)) => {
                                        format!("{} := ", names.names().join(", "))
                                    }
                                    None => String::new(),
                                };
                                format!("case recv {targets}{}", expr_to_string(&recv.expr))
                            }
                        };
                        this.line(&header, clause.span);
                        this.nested(|this| this.block_statements(&clause.body));
                    }
                });
            }
            StmtKind::For(for_stmt) => {
                let header = match &for_stmt.header {
                    ForHeader::Clause(clause) => format!(
                        "for {}; {}; {}",
                        clause.init.as_ref().map(simple_to_string).unwrap_or_default(),
                        clause.condition.as_ref().map(expr_to_string).unwrap_or_default(),
                        clause.post.as_ref().map(simple_to_string).unwrap_or_default()
                    ),
                    ForHeader::Range(range) => {
                        let bindings = match &range.bindings {
                            Some(RangeBindings::Define(names)) => format!("{} := ", names.names().join(", ")),
                            Some(RangeBindings::Assign(list)) => format!("{} = ", list_to_string(list)),
                            None => String::new(),
                        };
                        format!("for {bindings}range {}", expr_to_string(&range.expr))
                    }
                    ForHeader::Condition(condition) => format!("for {}", expr_to_string(condition)),
                    ForHeader::Infinite => "for".to_string(),
                };
                self.line(&header, span);
                self.nested(|this| this.block_statements(&for_stmt.body));
            }
            StmtKind::Block(block) => self.block("block", block),
            StmtKind::Defer(defer) => self.line(&format!("defer {}", expr_to_string(&defer.expr)), span),
        }
    }

    fn if_stmt(&mut self, if_stmt: &IfStmt, keyword: &str) {
        let init = if_stmt
            .init
            .as_ref()
            .map(|init| format!("{}; ", simple_to_string(init)))
            .unwrap_or_default();
        self.line(
            &format!("{keyword} {init}{}", expr_to_string(&if_stmt.condition)),
            if_stmt.span,
        );
        self.nested(|this| this.block_statements(&if_stmt.then_block));
        match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.block("else", block),
            Some(ElseBranch::If(nested)) => self.if_stmt(nested, "else if"),
            None => {}
        }
    }

    fn switch(&mut self, switch: &SwitchStmt) {
        match &switch.kind {
            SwitchStmtKind::Expr(switch) => {
                let init = switch
                    .init
                    .as_ref()
                    .map(|init| format!(" {};", simple_to_string(init)))
                    .unwrap_or_default();
                let subject = switch
                    .subject
                    .as_ref()
                    .map(|subject| format!(" {}", expr_to_string(subject)))
                    .unwrap_or_default();
                self.line(&format!("switch{init}{subject}"), switch.span);
                self.nested(|this| {
                    for clause in &switch.clauses {
                        let case = match clause.case.expressions() {
                            None => "_".to_string(),
                            Some(list) => list_to_string(list),
                        };
                        this.line(&format!("case {case}"), clause.span);
                        this.nested(|this| {
                            for stmt in &clause.statements {
                                this.stmt(stmt);
                            }
                        });
                    }
                });
            }
            SwitchStmtKind::Type(switch) => {
                let binding = switch
                    .guard
                    .binding
                    .as_deref()
                    .map(|name| format!("{name} := "))
                    .unwrap_or_default();
                self.line(
                    &format!("switch type {binding}{}", primary_to_string(&switch.guard.expr)),
                    switch.span,
                );
                self.nested(|this| {
                    for clause in &switch.clauses {
                        let case = match &clause.case.kind {
                            TypeSwitchCaseKind::Default => "_".to_string(),
                            TypeSwitchCaseKind::Types(types) => {
                                types.iter().map(type_to_string).collect::<Vec<_>>().join(", ")
                            }
                        };
                        this.line(&format!("case {case}"), clause.span);
                        this.nested(|this| {
                            for stmt in &clause.statements {
                                this.stmt(stmt);
                            }
                        });
                    }
                });
            }
        }
    }
}
