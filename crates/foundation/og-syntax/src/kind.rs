//! Production-kind tags of the Og grammar

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! syntax_kinds {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// Closed set of parse-tree node kinds
        ///
        /// One variant per grammar production, plus the token kinds the
        /// lowering engine reads directly.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum SyntaxKind {
            $($(#[$meta])* $variant,)*
        }

        impl SyntaxKind {
            /// Every kind, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Grammar name of this kind (`if_stmt`, `primary_expr`, ...)
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Looks a kind up by its grammar name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

syntax_kinds! {
    /// Identifier token
    Identifier => "identifier",
    /// String literal token (struct tags, import paths)
    StringLit => "string_lit",
    /// The receiver keyword (`this` / `@`)
    This => "this",
    /// End of input
    Eof => "eof",
    /// Any other keyword, punctuation or operator token
    Token => "token",

    /// `source_file` production
    SourceFile => "source_file",
    /// `package_clause` production
    PackageClause => "package_clause",
    /// `import_decl` production
    ImportDecl => "import_decl",
    /// `import_body` production
    ImportBody => "import_body",
    /// `import_spec` production
    ImportSpec => "import_spec",
    /// `import_path` production
    ImportPath => "import_path",
    /// `top_level_decl` production
    TopLevelDecl => "top_level_decl",
    /// `declaration` production
    Declaration => "declaration",
    /// `const_decl` production
    ConstDecl => "const_decl",
    /// `const_spec` production
    ConstSpec => "const_spec",
    /// `identifier_list` production
    IdentifierList => "identifier_list",
    /// `expression_list` production
    ExpressionList => "expression_list",
    /// `type_decl` production
    TypeDecl => "type_decl",
    /// `type_spec` production
    TypeSpec => "type_spec",
    /// `function_decl` production
    FunctionDecl => "function_decl",
    /// `function` production
    Function => "function",
    /// `method_decl` production
    MethodDecl => "method_decl",
    /// `receiver` production
    Receiver => "receiver",
    /// `var_decl` production
    VarDecl => "var_decl",
    /// `var_spec` production
    VarSpec => "var_spec",
    /// `block` production
    Block => "block",
    /// `statement_list` production
    StatementList => "statement_list",
    /// `statement` production
    Statement => "statement",
    /// `simple_stmt` production
    SimpleStmt => "simple_stmt",
    /// `send_stmt` production
    SendStmt => "send_stmt",
    /// `inc_dec_stmt` production
    IncDecStmt => "inc_dec_stmt",
    /// `assignment` production
    Assignment => "assignment",
    /// `assign_op` production
    AssignOp => "assign_op",
    /// `short_var_decl` production
    ShortVarDecl => "short_var_decl",
    /// `empty_stmt` production
    EmptyStmt => "empty_stmt",
    /// `labeled_stmt` production
    LabeledStmt => "labeled_stmt",
    /// `return_stmt` production
    ReturnStmt => "return_stmt",
    /// `break_stmt` production
    BreakStmt => "break_stmt",
    /// `continue_stmt` production
    ContinueStmt => "continue_stmt",
    /// `goto_stmt` production
    GotoStmt => "goto_stmt",
    /// `fallthrough_stmt` production
    FallthroughStmt => "fallthrough_stmt",
    /// `defer_stmt` production
    DeferStmt => "defer_stmt",
    /// `if_stmt` production
    IfStmt => "if_stmt",
    /// `switch_stmt` production
    SwitchStmt => "switch_stmt",
    /// `expr_switch_stmt` production
    ExprSwitchStmt => "expr_switch_stmt",
    /// `expr_case_clause` production
    ExprCaseClause => "expr_case_clause",
    /// `expr_switch_case` production
    ExprSwitchCase => "expr_switch_case",
    /// `type_switch_stmt` production
    TypeSwitchStmt => "type_switch_stmt",
    /// `type_switch_guard` production
    TypeSwitchGuard => "type_switch_guard",
    /// `type_case_clause` production
    TypeCaseClause => "type_case_clause",
    /// `type_switch_case` production
    TypeSwitchCase => "type_switch_case",
    /// `type_list` production
    TypeList => "type_list",
    /// `select_stmt` production
    SelectStmt => "select_stmt",
    /// `comm_clause` production
    CommClause => "comm_clause",
    /// `comm_case` production
    CommCase => "comm_case",
    /// `recv_stmt` production
    RecvStmt => "recv_stmt",
    /// `for_stmt` production
    ForStmt => "for_stmt",
    /// `for_clause` production
    ForClause => "for_clause",
    /// `range_clause` production
    RangeClause => "range_clause",
    /// `go_stmt` production
    GoStmt => "go_stmt",
    /// `type` production
    Type => "type",
    /// `type_name` production
    TypeName => "type_name",
    /// `type_lit` production
    TypeLit => "type_lit",
    /// `array_type` production
    ArrayType => "array_type",
    /// `array_length` production
    ArrayLength => "array_length",
    /// `element_type` production
    ElementType => "element_type",
    /// `pointer_type` production
    PointerType => "pointer_type",
    /// `interface_type` production
    InterfaceType => "interface_type",
    /// `slice_type` production
    SliceType => "slice_type",
    /// `map_type` production
    MapType => "map_type",
    /// `channel_type` production
    ChannelType => "channel_type",
    /// `channel_decl` production
    ChannelDecl => "channel_decl",
    /// `method_spec` production
    MethodSpec => "method_spec",
    /// `function_type` production
    FunctionType => "function_type",
    /// `signature` production
    Signature => "signature",
    /// `template_spec` production
    TemplateSpec => "template_spec",
    /// `result` production
    Result => "result",
    /// `parameters` production
    Parameters => "parameters",
    /// `parameter_list` production
    ParameterList => "parameter_list",
    /// `parameter_decl` production
    ParameterDecl => "parameter_decl",
    /// `rest_op` production
    RestOp => "rest_op",
    /// `operand` production
    Operand => "operand",
    /// `literal` production
    Literal => "literal",
    /// `basic_lit` production
    BasicLit => "basic_lit",
    /// `operand_name` production
    OperandName => "operand_name",
    /// `qualified_ident` production
    QualifiedIdent => "qualified_ident",
    /// `composite_lit` production
    CompositeLit => "composite_lit",
    /// `literal_type` production
    LiteralType => "literal_type",
    /// `literal_value` production
    LiteralValue => "literal_value",
    /// `element_list` production
    ElementList => "element_list",
    /// `keyed_element` production
    KeyedElement => "keyed_element",
    /// `key` production
    Key => "key",
    /// `element` production
    Element => "element",
    /// `struct_type` production
    StructType => "struct_type",
    /// `field_decl` production
    FieldDecl => "field_decl",
    /// `inline_struct_method` production
    InlineStructMethod => "inline_struct_method",
    /// `anonymous_field` production
    AnonymousField => "anonymous_field",
    /// `function_lit` production
    FunctionLit => "function_lit",
    /// `primary_expr` production
    PrimaryExpr => "primary_expr",
    /// `secondary_expr` production
    SecondaryExpr => "secondary_expr",
    /// `selector` production
    Selector => "selector",
    /// `index` production
    Index => "index",
    /// `slice` production
    Slice => "slice",
    /// `type_assertion` production
    TypeAssertion => "type_assertion",
    /// `arguments` production
    Arguments => "arguments",
    /// `method_expr` production
    MethodExpr => "method_expr",
    /// `receiver_type` production
    ReceiverType => "receiver_type",
    /// `expression` production
    Expression => "expression",
    /// `unary_expr` production
    UnaryExpr => "unary_expr",
    /// `conversion` production
    Conversion => "conversion",
    /// Statement terminator (`;`, newline or end of input)
    Eos => "eos",
    /// A single statement or top-level declaration evaluated on its own
    Interp => "interp",
}

impl SyntaxKind {
    /// Whether this kind is a leaf token rather than a grammar production
    pub const fn is_token(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::StringLit | Self::This | Self::Eof | Self::Token
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SyntaxKind::ALL {
            assert_eq!(SyntaxKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(SyntaxKind::from_name("if_statement"), None);
    }

    #[test]
    fn serde_names_match_grammar_names() {
        for kind in SyntaxKind::ALL {
            let json = serde_json_name(*kind);
            assert_eq!(json, kind.name(), "serde name of {kind:?}");
        }
    }

    #[test]
    fn tokens_are_leaves() {
        assert!(SyntaxKind::Identifier.is_token());
        assert!(SyntaxKind::Eof.is_token());
        assert!(!SyntaxKind::Eos.is_token());
        assert!(!SyntaxKind::PrimaryExpr.is_token());
    }

    fn serde_json_name(kind: SyntaxKind) -> String {
        let value = serde_json::to_value(kind).unwrap();
        value.as_str().unwrap().to_string()
    }
}
