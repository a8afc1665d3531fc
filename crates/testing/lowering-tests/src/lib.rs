//! Parse-tree fixtures for the lowering tests
//!
//! Trees are either assembled with [`og_syntax::build`] shorthands or loaded
//! from the JSON files under `tests/fixtures`. Fixture files store kinds,
//! token text and children only; spans are laid out on load.

use anyhow::{Context, Result};
use og_syntax::build::*;
use og_syntax::{SyntaxKind, SyntaxNode};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Parse-tree node as written in a fixture file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureNode {
    /// Production or token kind
    pub kind: SyntaxKind,
    /// Token text, ignored for productions
    #[serde(default)]
    pub text: String,
    /// Children; leaves omit the field
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

impl FixtureNode {
    /// Converts to a parse tree with absolute spans
    pub fn into_syntax(self) -> SyntaxNode {
        if self.kind.is_token() {
            SyntaxNode::token(self.kind, self.text)
        } else {
            let children = self.children.into_iter().map(Self::into_syntax).collect();
            SyntaxNode::branch(self.kind, children)
        }
    }
}

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Loads the parse tree stored in `tests/fixtures/<name>.json`
pub fn load_fixture(name: &str) -> Result<SyntaxNode> {
    let path = fixture_path(&format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    let fixture: FixtureNode = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse fixture {}", path.display()))?;
    Ok(fixture.into_syntax())
}

/// Every kind occurring in `root`
pub fn kinds_in(root: &SyntaxNode) -> HashSet<SyntaxKind> {
    let mut kinds = HashSet::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        kinds.insert(node.kind);
        stack.extend(&node.children);
    }
    kinds
}

fn separated(items: Vec<SyntaxNode>, separator: &str) -> Vec<SyntaxNode> {
    let mut children = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            children.push(token(separator));
        }
        children.push(item);
    }
    children
}

// Units and items

/// `source_file`: a package clause, then one member per line
pub fn unit(package: &str, members: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![package_clause(package)];
    for member in members {
        children.push(semi());
        children.push(member);
    }
    children.push(end_of_input());
    node(SyntaxKind::SourceFile, children)
}

/// `interp` holding one statement or top-level declaration
pub fn interp(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::Interp, vec![inner, end_of_input()])
}

/// `package` clause
pub fn package_clause(name: &str) -> SyntaxNode {
    node(SyntaxKind::PackageClause, vec![token("!"), ident(name)])
}

/// `import_path` leaf
pub fn import_path(path: &str) -> SyntaxNode {
    node(SyntaxKind::ImportPath, vec![token(path)])
}

/// `import_spec`; `prefix` is an alias identifier or a merge marker token
pub fn import_spec(prefix: Option<SyntaxNode>, path: &str) -> SyntaxNode {
    let mut children: Vec<SyntaxNode> = prefix.into_iter().collect();
    children.push(import_path(path));
    node(SyntaxKind::ImportSpec, children)
}

/// Parenthesized `import_decl`, one spec per line
pub fn import_decl(specs: Vec<SyntaxNode>) -> SyntaxNode {
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

/// `top_level_decl` wrapper
pub fn top_level(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::TopLevelDecl, vec![inner])
}

/// `declaration` wrapping a const, type or var declaration
pub fn declaration(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::Declaration, vec![inner])
}

/// `parameter_decl` naming `names`
pub fn parameter(names: &[&str], ty: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::ParameterDecl,
        vec![ident_list(names), token(" "), ty],
    )
}

/// Parenthesized parameter list
pub fn parameters(list: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("(")];
    if !list.is_empty() {
        children.push(node(SyntaxKind::ParameterList, separated(list, ",")));
    }
    children.push(token(")"));
    node(SyntaxKind::Parameters, children)
}

/// `result` listing types
pub fn result(types: Vec<SyntaxNode>) -> SyntaxNode {
    node(SyntaxKind::Result, separated(types, ","))
}

/// `signature` with optional result
pub fn signature(params: Vec<SyntaxNode>, result: Option<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![parameters(params)];
    children.extend(result);
    node(SyntaxKind::Signature, children)
}

/// `function` whose body is a block of `statements`
pub fn function(signature: SyntaxNode, statements: Vec<SyntaxNode>) -> SyntaxNode {
    node(
        SyntaxKind::Function,
        vec![signature, token("->"), block(statements)],
    )
}

/// `name: function`
pub fn function_decl(name: &str, function: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::FunctionDecl,
        vec![ident(name), token(":"), function],
    )
}

/// `Owner::method`, with a leading `*` for pointer receivers
pub fn method_decl(owner: &str, method: &str, pointer: bool, function: SyntaxNode) -> SyntaxNode {
    let mut receiver = Vec::new();
    if pointer {
        receiver.push(token("*"));
    }
    receiver.extend([ident(owner), token("::"), ident(method)]);
    node(
        SyntaxKind::MethodDecl,
        vec![node(SyntaxKind::Receiver, receiver), token(":"), function],
    )
}

// Types

/// `type` holding a type literal
pub fn type_lit(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::Type, vec![node(SyntaxKind::TypeLit, vec![inner])])
}

/// `element_type` wrapper
pub fn element_type(ty: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::ElementType, vec![ty])
}

/// `[]T`
pub fn slice_type(elem: SyntaxNode) -> SyntaxNode {
    type_lit(node(
        SyntaxKind::SliceType,
        vec![token("[]"), element_type(elem)],
    ))
}

/// `map[K]V`
pub fn map_type(key: SyntaxNode, value: SyntaxNode) -> SyntaxNode {
    type_lit(node(
        SyntaxKind::MapType,
        vec![token("map["), key, token("]"), element_type(value)],
    ))
}

/// `*T`
pub fn pointer_type(ty: SyntaxNode) -> SyntaxNode {
    type_lit(node(SyntaxKind::PointerType, vec![token("*"), ty]))
}

/// `array_type` production, usable as a type literal or a literal type
pub fn array_type(length: SyntaxNode, elem: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::ArrayType,
        vec![
            token("["),
            node(SyntaxKind::ArrayLength, vec![length]),
            token("]"),
            element_type(elem),
        ],
    )
}

/// Channel type with the given `chan` tokens
pub fn channel_type(decl: Vec<SyntaxNode>, elem: SyntaxNode) -> SyntaxNode {
    type_lit(node(
        SyntaxKind::ChannelType,
        vec![node(SyntaxKind::ChannelDecl, decl), element_type(elem)],
    ))
}

/// Function type
pub fn function_type(signature: SyntaxNode) -> SyntaxNode {
    type_lit(node(SyntaxKind::FunctionType, vec![token("fn"), signature]))
}

// Expressions

/// `expression` applying a prefix operator to a primary expression
pub fn unary(op: &str, primary: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::Expression,
        vec![node(
            SyntaxKind::UnaryExpr,
            vec![token(op), node(SyntaxKind::UnaryExpr, vec![primary])],
        )],
    )
}

/// Parenthesized expression as a primary expression
pub fn paren(inner: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::PrimaryExpr,
        vec![node(
            SyntaxKind::Operand,
            vec![token("("), inner, token(")")],
        )],
    )
}

/// `pkg.Name`
pub fn qualified(package: &str, name: &str) -> SyntaxNode {
    primary(node(
        SyntaxKind::OperandName,
        vec![node(
            SyntaxKind::QualifiedIdent,
            vec![ident(package), token("."), ident(name)],
        )],
    ))
}

/// `@field`
pub fn this_field(field: &str) -> SyntaxNode {
    primary(node(
        SyntaxKind::OperandName,
        vec![node(
            SyntaxKind::QualifiedIdent,
            vec![SyntaxNode::token(SyntaxKind::This, "@"), ident(field)],
        )],
    ))
}

/// Bare `@`
pub fn this() -> SyntaxNode {
    primary(node(
        SyntaxKind::OperandName,
        vec![SyntaxNode::token(SyntaxKind::This, "@")],
    ))
}

/// String literal expression
pub fn string_lit(text: &str) -> SyntaxNode {
    expr(primary(node(
        SyntaxKind::Literal,
        vec![node(
            SyntaxKind::BasicLit,
            vec![SyntaxNode::token(SyntaxKind::StringLit, text)],
        )],
    )))
}

/// `.name` suffix
pub fn select(inner: SyntaxNode, name: &str) -> SyntaxNode {
    suffixed(inner, SyntaxKind::Selector, vec![token("."), ident(name)])
}

/// `[at]` suffix
pub fn index(inner: SyntaxNode, at: SyntaxNode) -> SyntaxNode {
    suffixed(inner, SyntaxKind::Index, vec![token("["), at, token("]")])
}

/// Slice suffix; `parts` holds the bound expressions and `:` tokens
pub fn slice(inner: SyntaxNode, parts: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("[")];
    children.extend(parts);
    children.push(token("]"));
    suffixed(inner, SyntaxKind::Slice, children)
}

/// Call suffix
pub fn call(callee: SyntaxNode, args: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("(")];
    if !args.is_empty() {
        children.push(expr_list(args));
    }
    children.push(token(")"));
    suffixed(callee, SyntaxKind::Arguments, children)
}

/// Composite literal as an expression
pub fn composite(
    literal_type: SyntaxNode,
    template: Option<SyntaxNode>,
    elements: Vec<SyntaxNode>,
) -> SyntaxNode {
    let mut children = vec![node(SyntaxKind::LiteralType, vec![literal_type])];
    children.extend(template);
    children.push(literal_value(elements));
    expr(primary(node(
        SyntaxKind::Literal,
        vec![node(SyntaxKind::CompositeLit, children)],
    )))
}

/// Brace-delimited literal value
pub fn literal_value(elements: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("{")];
    if !elements.is_empty() {
        children.push(node(SyntaxKind::ElementList, separated(elements, ",")));
    }
    children.push(token("}"));
    node(SyntaxKind::LiteralValue, children)
}

/// `keyed_element`; `key` and `element` are the inner productions
pub fn keyed(key: Option<SyntaxNode>, element: SyntaxNode) -> SyntaxNode {
    let mut children = Vec::new();
    if let Some(key) = key {
        children.push(node(SyntaxKind::Key, vec![key]));
        children.push(token(":"));
    }
    children.push(node(SyntaxKind::Element, vec![element]));
    node(SyntaxKind::KeyedElement, children)
}

/// `<T, U>` template
pub fn template(types: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("<")];
    children.extend(separated(types, ","));
    children.push(token(">"));
    node(SyntaxKind::TemplateSpec, children)
}

// Statements

/// `simple_stmt` wrapper
pub fn simple_stmt(inner: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::SimpleStmt, vec![inner])
}

/// `a, b := values`
pub fn short_var_decl(names: &[&str], values: Vec<SyntaxNode>) -> SyntaxNode {
    node(
        SyntaxKind::ShortVarDecl,
        vec![ident_list(names), token(":="), expr_list(values)],
    )
}

/// Single assignment
pub fn assignment(left: SyntaxNode, op: &str, right: SyntaxNode) -> SyntaxNode {
    node(
        SyntaxKind::Assignment,
        vec![
            expr_list(vec![left]),
            node(SyntaxKind::AssignOp, vec![token(op)]),
            expr_list(vec![right]),
        ],
    )
}

/// `x++` or `x--`
pub fn inc_dec(operand: SyntaxNode, op: &str) -> SyntaxNode {
    node(SyntaxKind::IncDecStmt, vec![operand, token(op)])
}

/// `ch <- v`
pub fn send_stmt(channel: SyntaxNode, value: SyntaxNode) -> SyntaxNode {
    node(SyntaxKind::SendStmt, vec![channel, token("<-"), value])
}

/// `return values` statement
pub fn return_stmt(values: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![token("return ")];
    if !values.is_empty() {
        children.push(expr_list(values));
    }
    stmt(node(SyntaxKind::ReturnStmt, children))
}

/// `if cond body [else branch]`; `init` is a `simple_stmt`
pub fn if_stmt(
    init: Option<SyntaxNode>,
    condition: SyntaxNode,
    body: SyntaxNode,
    else_branch: Option<SyntaxNode>,
) -> SyntaxNode {
    let mut children = vec![token("if ")];
    if let Some(init) = init {
        children.push(init);
        children.push(token(";"));
    }
    children.push(condition);
    children.push(body);
    if let Some(branch) = else_branch {
        children.push(token("else "));
        children.push(branch);
    }
    node(SyntaxKind::IfStmt, children)
}

/// Classic three-part `for`; `init` and `post` are `simple_stmt`s
pub fn for_clause(
    init: Option<SyntaxNode>,
    condition: Option<SyntaxNode>,
    post: Option<SyntaxNode>,
    body: SyntaxNode,
) -> SyntaxNode {
    let mut clause: Vec<SyntaxNode> = init.into_iter().collect();
    clause.push(token(";"));
    clause.extend(condition);
    clause.push(token(";"));
    clause.extend(post);
    stmt(node(
        SyntaxKind::ForStmt,
        vec![token("for "), node(SyntaxKind::ForClause, clause), body],
    ))
}

/// Case clause whose statements form a `statement_list`
pub fn clause_list(kind: SyntaxKind, case: SyntaxNode, statements: Vec<SyntaxNode>) -> SyntaxNode {
    let mut list = Vec::new();
    for statement in statements {
        list.push(statement);
        list.push(semi());
    }
    node(
        kind,
        vec![case, token(":"), node(SyntaxKind::StatementList, list)],
    )
}

fn wildcard(kind: SyntaxKind) -> SyntaxNode {
    node(kind, vec![token("_")])
}

// The whole-unit fixture

fn call_stmt(callee: &str) -> SyntaxNode {
    expr_stmt(expr(call(name_primary(callee), vec![])))
}

fn struct_decl() -> SyntaxNode {
    let field = |children| node(SyntaxKind::FieldDecl, children);
    let members = vec![
        field(vec![
            ident_list(&["items"]),
            token(" "),
            slice_type(type_name("T")),
            token(" "),
            SyntaxNode::token(SyntaxKind::StringLit, "`json:\"items\"`"),
        ]),
        field(vec![
            ident_list(&["index"]),
            token(" "),
            map_type(type_name("string"), pointer_type(type_name("int"))),
        ]),
        field(vec![
            ident_list(&["grid"]),
            token(" "),
            type_lit(array_type(lit("4"), type_name("byte"))),
        ]),
        field(vec![
            ident_list(&["events"]),
            token(" "),
            channel_type(vec![token("<-"), token("chan")], type_name("int")),
        ]),
        field(vec![
            ident_list(&["hook"]),
            token(" "),
            function_type(signature(vec![], Some(result(vec![type_name("bool")])))),
        ]),
        field(vec![
            ident_list(&["sink"]),
            token(" "),
            type_lit(node(
                SyntaxKind::InterfaceType,
                vec![token("interface{"), token("}")],
            )),
        ]),
        field(vec![node(
            SyntaxKind::AnonymousField,
            vec![token("*"), node(SyntaxKind::TypeName, vec![ident("Base")])],
        )]),
        field(vec![node(
            SyntaxKind::InlineStructMethod,
            vec![
                token("*"),
                function_decl(
                    "clear",
                    function(
                        signature(vec![], None),
                        vec![simple(assignment(expr(this_field("items")), "=", name("nil")))],
                    ),
                ),
            ],
        )]),
    ];

    let mut children = vec![
        token("struct "),
        ident("Box"),
        template(vec![type_name("T")]),
        token("{"),
    ];
    for member in members {
        children.push(member);
        children.push(semi());
    }
    children.push(token("}"));
    top_level(declaration(node(
        SyntaxKind::TypeDecl,
        vec![node(SyntaxKind::StructType, children)],
    )))
}

fn interface_decl() -> SyntaxNode {
    let read = node(
        SyntaxKind::MethodSpec,
        vec![
            ident("Read"),
            parameters(vec![parameter(&["p"], slice_type(type_name("byte")))]),
            node(
                SyntaxKind::Result,
                vec![parameters(vec![
                    parameter(&["n"], type_name("int")),
                    parameter(&["err"], type_name("error")),
                ])],
            ),
        ],
    );
    let closer = node(
        SyntaxKind::MethodSpec,
        vec![node(
            SyntaxKind::TypeName,
            vec![ident("io"), token("."), ident("Closer")],
        )],
    );
    let stringer = node(SyntaxKind::MethodSpec, vec![ident("Stringer")]);
    top_level(declaration(node(
        SyntaxKind::TypeDecl,
        vec![node(
            SyntaxKind::InterfaceType,
            vec![
                token("interface "),
                ident("Reader"),
                token("{"),
                read,
                semi(),
                closer,
                semi(),
                stringer,
                token("}"),
            ],
        )],
    )))
}

fn const_decl() -> SyntaxNode {
    top_level(declaration(node(
        SyntaxKind::ConstDecl,
        vec![
            token("const "),
            node(
                SyntaxKind::ConstSpec,
                vec![
                    ident_list(&["limit"]),
                    token(" "),
                    type_name("int"),
                    token("="),
                    expr_list(vec![lit("10")]),
                ],
            ),
        ],
    )))
}

fn type_spec_decl() -> SyntaxNode {
    top_level(declaration(node(
        SyntaxKind::TypeDecl,
        vec![
            token("type "),
            node(
                SyntaxKind::TypeSpec,
                vec![
                    ident("Id"),
                    token(" "),
                    node(SyntaxKind::Type, vec![token("("), type_name("int"), token(")")]),
                ],
            ),
        ],
    )))
}

fn var_decl() -> SyntaxNode {
    let ready = stmt(if_stmt(
        None,
        binary(name("counter"), ">", lit("0")),
        block(vec![expr_stmt(name("true"))]),
        Some(block(vec![expr_stmt(name("false"))])),
    ));
    top_level(declaration(node(
        SyntaxKind::VarDecl,
        vec![
            token("var "),
            node(
                SyntaxKind::VarSpec,
                vec![
                    ident_list(&["counter"]),
                    token(" "),
                    type_name("int"),
                    token("="),
                    expr_list(vec![lit("0")]),
                ],
            ),
            semi(),
            node(
                SyntaxKind::VarSpec,
                vec![ident_list(&["ready"]), token("="), ready],
            ),
        ],
    )))
}

fn push_method() -> SyntaxNode {
    let rest = node(
        SyntaxKind::ParameterDecl,
        vec![
            ident_list(&["xs"]),
            token(" "),
            node(SyntaxKind::RestOp, vec![token("...")]),
            type_name("T"),
        ],
    );
    let append = suffixed(
        name_primary("append"),
        SyntaxKind::Arguments,
        vec![
            token("("),
            expr_list(vec![expr(this_field("items")), name("xs")]),
            token("..."),
            token(")"),
        ],
    );
    top_level(method_decl(
        "Box",
        "push",
        true,
        function(
            signature(vec![rest], Some(result(vec![type_name("int")]))),
            vec![
                simple(assignment(expr(this_field("items")), "=", expr(append))),
                return_stmt(vec![expr(call(
                    name_primary("len"),
                    vec![expr(this_field("items"))],
                ))]),
            ],
        ),
    ))
}

fn generic_function() -> SyntaxNode {
    let signature = node(
        SyntaxKind::Signature,
        vec![
            node(
                SyntaxKind::TemplateSpec,
                vec![token("<"), result(vec![type_name("T")]), token(">")],
            ),
            parameters(vec![parameter(&["xs"], slice_type(type_name("T")))]),
            result(vec![type_name("T")]),
        ],
    );
    top_level(function_decl(
        "first",
        function(
            signature,
            vec![return_stmt(vec![expr(index(name_primary("xs"), lit("0")))])],
        ),
    ))
}

fn extern_function() -> SyntaxNode {
    top_level(node(
        SyntaxKind::FunctionDecl,
        vec![
            ident("exit"),
            token(":"),
            signature(vec![parameter(&["code"], type_name("int"))], None),
        ],
    ))
}

fn expression_statement() -> SyntaxNode {
    let sum = binary(
        unary("-", name_primary("x")),
        "+",
        expr(paren(binary(name("x"), "*", lit("2")))),
    );
    let tail = expr(slice(
        name_primary("list"),
        vec![name("lo"), token(":")],
    ));
    let window = expr(slice(
        name_primary("list"),
        vec![token(":"), name("x"), token(":"), lit("4")],
    ));
    let asserted = expr(suffixed(
        name_primary("value"),
        SyntaxKind::TypeAssertion,
        vec![token("."), token("("), type_name("int"), token(")")],
    ));
    let converted = expr(node(
        SyntaxKind::PrimaryExpr,
        vec![node(
            SyntaxKind::Conversion,
            vec![type_name("float"), token("("), name("x"), token(")")],
        )],
    ));
    let method_value = expr(primary(node(
        SyntaxKind::MethodExpr,
        vec![
            node(
                SyntaxKind::ReceiverType,
                vec![
                    token("("),
                    node(
                        SyntaxKind::ReceiverType,
                        vec![token("*"), node(SyntaxKind::TypeName, vec![ident("Box")])],
                    ),
                    token(")"),
                ],
            ),
            token("."),
            ident("push"),
        ],
    )));
    let instantiated = expr(suffixed(
        name_primary("make"),
        SyntaxKind::Arguments,
        vec![template(vec![type_name("int")]), token("("), token(")")],
    ));
    expr_stmt(expr(call(
        qualified("fmt", "Println"),
        vec![
            expr(this_field("count")),
            expr(this()),
            sum,
            tail,
            window,
            asserted,
            converted,
            method_value,
            instantiated,
        ],
    )))
}

fn composite_literals() -> SyntaxNode {
    let point = composite(
        node(SyntaxKind::TypeName, vec![ident("Point")]),
        None,
        vec![
            keyed(Some(ident("x")), lit("1")),
            keyed(Some(lit("2")), literal_value(vec![keyed(None, lit("3"))])),
            keyed(Some(literal_value(vec![])), lit("4")),
            keyed(None, lit("5")),
        ],
    );
    let numbers = composite(
        node(
            SyntaxKind::SliceType,
            vec![token("[]"), element_type(type_name("int"))],
        ),
        None,
        vec![keyed(None, lit("1"))],
    );
    let elided = composite(
        element_type(type_name("int")),
        None,
        vec![keyed(None, lit("1"))],
    );
    let pair = composite(
        array_type(lit("2"), type_name("int")),
        None,
        vec![keyed(None, lit("1")), keyed(None, lit("2"))],
    );
    let table = composite(
        node(
            SyntaxKind::MapType,
            vec![
                token("map["),
                type_name("string"),
                token("]"),
                element_type(type_name("int")),
            ],
        ),
        None,
        vec![],
    );
    let anonymous = composite(
        node(SyntaxKind::StructType, vec![token("struct{"), token("}")]),
        None,
        vec![],
    );
    let boxed = composite(
        node(SyntaxKind::TypeName, vec![ident("Box")]),
        Some(template(vec![type_name("int")])),
        vec![],
    );
    simple(short_var_decl(
        &["p", "n", "e", "a", "m", "s", "b"],
        vec![point, numbers, elided, pair, table, anonymous, boxed],
    ))
}

fn function_literal() -> SyntaxNode {
    let doubled = node(
        SyntaxKind::Function,
        vec![
            signature(vec![parameter(&["n"], type_name("int"))], None),
            token("->"),
            expr_stmt(binary(name("n"), "*", lit("2"))),
        ],
    );
    let literal = expr(primary(node(
        SyntaxKind::Literal,
        vec![node(SyntaxKind::FunctionLit, vec![token("fn"), doubled])],
    )));
    simple(short_var_decl(&["cb"], vec![literal]))
}

fn labeled_loop() -> SyntaxNode {
    let body = block(vec![
        stmt(node(
            SyntaxKind::BreakStmt,
            vec![token("break "), ident("outer")],
        )),
        stmt(node(SyntaxKind::ContinueStmt, vec![token("continue")])),
    ]);
    stmt(node(
        SyntaxKind::LabeledStmt,
        vec![
            ident("outer"),
            token(":"),
            stmt(node(SyntaxKind::ForStmt, vec![token("for "), body])),
        ],
    ))
}

fn if_chain() -> SyntaxNode {
    let inner = if_stmt(
        None,
        name("ready"),
        block(vec![call_stmt("go_on")]),
        Some(simple(inc_dec(name("x"), "--"))),
    );
    stmt(if_stmt(
        Some(simple_stmt(short_var_decl(&["y"], vec![name("x")]))),
        binary(name("y"), ">", lit("0")),
        block(vec![call_stmt("positive")]),
        Some(inner),
    ))
}

fn expr_switch() -> SyntaxNode {
    let listed = clause_list(
        SyntaxKind::ExprCaseClause,
        node(
            SyntaxKind::ExprSwitchCase,
            vec![token("case "), expr_list(vec![lit("1"), lit("2")])],
        ),
        vec![
            call_stmt("small"),
            stmt(node(SyntaxKind::FallthroughStmt, vec![token("fallthrough")])),
        ],
    );
    let single = node(
        SyntaxKind::ExprCaseClause,
        vec![
            node(
                SyntaxKind::ExprSwitchCase,
                vec![token("case "), expr_list(vec![lit("3")])],
            ),
            token(":"),
            call_stmt("three"),
        ],
    );
    let default = node(
        SyntaxKind::ExprCaseClause,
        vec![
            wildcard(SyntaxKind::ExprSwitchCase),
            token(":"),
            block(vec![call_stmt("other")]),
        ],
    );
    stmt(node(
        SyntaxKind::SwitchStmt,
        vec![node(
            SyntaxKind::ExprSwitchStmt,
            vec![
                token("switch "),
                simple_stmt(short_var_decl(&["z"], vec![name("x")])),
                token(";"),
                name("z"),
                token("{"),
                listed,
                single,
                default,
                token("}"),
            ],
        )],
    ))
}

fn type_switch() -> SyntaxNode {
    let listed = clause_list(
        SyntaxKind::TypeCaseClause,
        node(
            SyntaxKind::TypeSwitchCase,
            vec![
                token("case "),
                node(
                    SyntaxKind::TypeList,
                    vec![type_name("int"), token(","), type_name("string")],
                ),
            ],
        ),
        vec![call_stmt("scalar")],
    );
    let default = node(
        SyntaxKind::TypeCaseClause,
        vec![
            wildcard(SyntaxKind::TypeSwitchCase),
            token(":"),
            block(vec![call_stmt("other")]),
        ],
    );
    stmt(node(
        SyntaxKind::SwitchStmt,
        vec![node(
            SyntaxKind::TypeSwitchStmt,
            vec![
                token("switch "),
                node(
                    SyntaxKind::TypeSwitchGuard,
                    vec![
                        ident("v"),
                        token(":="),
                        name_primary("value"),
                        token(".(type)"),
                    ],
                ),
                token("{"),
                listed,
                default,
                token("}"),
            ],
        )],
    ))
}

fn select_stmt() -> SyntaxNode {
    let comm = |case: Vec<SyntaxNode>| node(SyntaxKind::CommCase, case);
    let send = node(
        SyntaxKind::CommClause,
        vec![
            comm(vec![token("case "), send_stmt(name("ch"), name("x"))]),
            token(":"),
            block(vec![call_stmt("sent")]),
        ],
    );
    let define = clause_list(
        SyntaxKind::CommClause,
        comm(vec![
            token("case "),
            node(
                SyntaxKind::RecvStmt,
                vec![
                    ident_list(&["msg"]),
                    token(":="),
                    unary("<-", name_primary("ch")),
                ],
            ),
        ]),
        vec![call_stmt("received")],
    );
    let assign = node(
        SyntaxKind::CommClause,
        vec![
            comm(vec![
                token("case "),
                node(
                    SyntaxKind::RecvStmt,
                    vec![
                        expr_list(vec![name("x")]),
                        token("="),
                        unary("<-", name_primary("ch")),
                    ],
                ),
            ]),
            token(":"),
            call_stmt("stored"),
        ],
    );
    let default = node(
        SyntaxKind::CommClause,
        vec![wildcard(SyntaxKind::CommCase), token(":"), call_stmt("idle")],
    );
    stmt(node(
        SyntaxKind::SelectStmt,
        vec![
            token("select "),
            token("{"),
            send,
            define,
            assign,
            default,
            token("}"),
        ],
    ))
}

fn loops() -> Vec<SyntaxNode> {
    let counted = for_clause(
        Some(simple_stmt(short_var_decl(&["i"], vec![lit("0")]))),
        Some(binary(name("i"), "<", lit("10"))),
        Some(simple_stmt(inc_dec(name("i"), "++"))),
        block(vec![call_stmt("tick")]),
    );
    let ranged = stmt(node(
        SyntaxKind::ForStmt,
        vec![
            token("for "),
            node(
                SyntaxKind::RangeClause,
                vec![
                    ident_list(&["k", "v"]),
                    token(":="),
                    token("range "),
                    name("items"),
                ],
            ),
            block(vec![call_stmt("visit")]),
        ],
    ));
    let reassigned = stmt(node(
        SyntaxKind::ForStmt,
        vec![
            token("for "),
            node(
                SyntaxKind::RangeClause,
                vec![
                    expr_list(vec![name("x")]),
                    token("="),
                    token("range "),
                    name("items"),
                ],
            ),
            block(vec![]),
        ],
    ));
    let conditional = stmt(node(
        SyntaxKind::ForStmt,
        vec![token("for "), name("ready"), call_stmt("wait")],
    ));
    vec![counted, ranged, reassigned, conditional]
}

fn main_function() -> SyntaxNode {
    let make_channel = suffixed(
        name_primary("make"),
        SyntaxKind::Arguments,
        vec![
            token("("),
            channel_type(vec![token("chan ")], type_name("int")),
            token(","),
            expr_list(vec![lit("1")]),
            token(")"),
        ],
    );
    let local = stmt(declaration(node(
        SyntaxKind::VarDecl,
        vec![
            token("var "),
            node(
                SyntaxKind::VarSpec,
                vec![ident_list(&["local"]), token(" "), type_name("int")],
            ),
        ],
    )));
    let spawned = stmt(node(
        SyntaxKind::GoStmt,
        vec![
            token("go "),
            function(signature(vec![], None), vec![call_stmt("work")]),
        ],
    ));

    let mut statements = vec![
        simple(short_var_decl(&["x"], vec![lit("1")])),
        simple(assignment(name("x"), "+=", lit("2"))),
        simple(inc_dec(name("x"), "++")),
        simple(short_var_decl(&["ch"], vec![expr(make_channel)])),
        simple(send_stmt(name("ch"), name("x"))),
        simple(node(SyntaxKind::EmptyStmt, vec![])),
        expression_statement(),
        composite_literals(),
        function_literal(),
        labeled_loop(),
        stmt(node(SyntaxKind::GotoStmt, vec![token("goto "), ident("outer")])),
        if_chain(),
        expr_switch(),
        type_switch(),
        select_stmt(),
    ];
    statements.extend(loops());
    statements.extend([
        stmt(node(
            SyntaxKind::GoStmt,
            vec![token("go "), expr(call(name_primary("work"), vec![]))],
        )),
        spawned,
        stmt(node(
            SyntaxKind::DeferStmt,
            vec![
                token("defer "),
                expr(call(
                    select(name_primary("fmt"), "Println"),
                    vec![string_lit("\"done\"")],
                )),
            ],
        )),
        stmt(block(vec![call_stmt("scoped")])),
        local,
        return_stmt(vec![]),
    ]);
    top_level(function_decl(
        "main",
        function(signature(vec![], None), statements),
    ))
}

/// A source unit exercising every production of the grammar except `interp`
pub fn everything() -> SyntaxNode {
    unit(
        "main",
        vec![
            import_decl(vec![
                import_spec(None, "fmt"),
                import_spec(Some(ident("str")), "strings"),
                import_spec(Some(token(".")), "math"),
            ]),
            node(
                SyntaxKind::ImportDecl,
                vec![token("import "), import_spec(None, "os")],
            ),
            const_decl(),
            type_spec_decl(),
            struct_decl(),
            interface_decl(),
            var_decl(),
            push_method(),
            generic_function(),
            extern_function(),
            main_function(),
        ],
    )
}
