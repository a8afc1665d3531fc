//! Statements

use crate::{Block, Declaration, Expr, ExpressionList, Function, IdentifierList, PrimaryExpr, Type};
use og_span::FileSpan;
use serde::{Deserialize, Serialize};

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    /// Node form
    pub kind: StmtKind,
    /// Source location
    pub span: FileSpan,
}

impl Stmt {
    /// Create a new `Stmt`
    pub fn new(kind: StmtKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Statement form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Local declaration
    Declaration(Declaration),
    /// Simple statement
    Simple(SimpleStmt),
    /// `label: stmt`
    Labeled(LabeledStmt),
    /// `go` statement
    Go(GoStmt),
    /// `return` statement
    Return(ReturnStmt),
    /// `break`, with an optional label
    Break {
        /// Target label
        label: Option<String>,
    },
    /// `continue`, with an optional label
    Continue {
        /// Target label
        label: Option<String>,
    },
    /// `goto label`
    Goto {
        /// Target label
        label: String,
    },
    /// `fallthrough`
    Fallthrough,
    /// `if` statement
    If(Box<IfStmt>),
    /// Expression or type switch
    Switch(Box<SwitchStmt>),
    /// `select` statement
    Select(SelectStmt),
    /// `for` statement
    For(Box<ForStmt>),
    /// Nested block
    Block(Block),
    /// `defer` statement
    Defer(DeferStmt),
}

/// Simple statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleStmt {
    /// Node form
    pub kind: SimpleStmtKind,
    /// Source location
    pub span: FileSpan,
}

impl SimpleStmt {
    /// Create a new `SimpleStmt`
    pub fn new(kind: SimpleStmtKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Simple statement form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimpleStmtKind {
    /// `ch <- v`
    Send(SendStmt),
    /// Expression statement
    Expression(Expr),
    /// `x++` or `x--`
    IncDec(IncDecStmt),
    /// `a, b := ...`
    ShortVarDecl(ShortVarDecl),
    /// Assignment
    Assignment(Assignment),
    /// Empty statement
    Empty(EmptyStmt),
}

/// The empty statement, rendered downstream as a bare newline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyStmt {
    /// Always [`EmptyStmt::TEXT`]
    pub text: String,
    /// Source location
    pub span: FileSpan,
}

impl EmptyStmt {
    /// Text of every empty statement
    pub const TEXT: &'static str = "\n";

    /// Create a new `EmptyStmt`
    pub fn new(span: FileSpan) -> Self {
        Self {
            text: Self::TEXT.to_string(),
            span,
        }
    }
}

/// `channel <- value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendStmt {
    /// Channel expression
    pub channel: Expr,
    /// Sent value
    pub value: Expr,
    /// Source location
    pub span: FileSpan,
}

impl SendStmt {
    /// Create a new `SendStmt`
    pub fn new(channel: Expr, value: Expr, span: FileSpan) -> Self {
        Self {
            channel,
            value,
            span,
        }
    }
}

/// `x++` or `x--`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncDecStmt {
    /// Operand
    pub expr: Expr,
    /// `++` rather than `--`
    pub is_increment: bool,
    /// Source location
    pub span: FileSpan,
}

impl IncDecStmt {
    /// Create a new `IncDecStmt`
    pub fn new(expr: Expr, is_increment: bool, span: FileSpan) -> Self {
        Self {
            expr,
            is_increment,
            span,
        }
    }
}

/// `left op right` assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned expressions
    pub left: ExpressionList,
    /// `=` or a compound operator such as `+=`
    pub op: String,
    /// Values
    pub right: ExpressionList,
    /// Source location
    pub span: FileSpan,
}

impl Assignment {
    /// Create a new `Assignment`
    pub fn new(
        left: ExpressionList,
        op: impl Into<String>,
        right: ExpressionList,
        span: FileSpan,
    ) -> Self {
        Self {
            left,
            op: op.into(),
            right,
            span,
        }
    }
}

/// `names := values`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortVarDecl {
    /// Declared names
    pub identifiers: IdentifierList,
    /// Values
    pub values: Option<ExpressionList>,
    /// Source location
    pub span: FileSpan,
}

impl ShortVarDecl {
    /// Create a new `ShortVarDecl`
    pub fn new(identifiers: IdentifierList, values: Option<ExpressionList>, span: FileSpan) -> Self {
        Self {
            identifiers,
            values,
            span,
        }
    }
}

/// Labeled statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStmt {
    /// Label
    pub label: String,
    /// Labeled statement
    pub statement: Box<Stmt>,
    /// Source location
    pub span: FileSpan,
}

impl LabeledStmt {
    /// Create a new `LabeledStmt`
    pub fn new(label: impl Into<String>, statement: Stmt, span: FileSpan) -> Self {
        Self {
            label: label.into(),
            statement: Box::new(statement),
            span,
        }
    }
}

/// Spawns a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoStmt {
    /// Started call
    pub target: GoTarget,
    /// Source location
    pub span: FileSpan,
}

impl GoStmt {
    /// Create a new `GoStmt`
    pub fn new(target: GoTarget, span: FileSpan) -> Self {
        Self { target, span }
    }
}

/// Target of a `go` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GoTarget {
    /// Call expression
    Expression(Expr),
    /// Anonymous function spawned in place
    Function(Box<Function>),
}

/// `return` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    /// Returned values
    pub values: Option<ExpressionList>,
    /// Source location
    pub span: FileSpan,
}

impl ReturnStmt {
    /// Create a new `ReturnStmt`
    pub fn new(values: Option<ExpressionList>, span: FileSpan) -> Self {
        Self { values, span }
    }
}

/// `defer` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferStmt {
    /// Deferred call
    pub expr: Expr,
    /// Source location
    pub span: FileSpan,
}

impl DeferStmt {
    /// Create a new `DeferStmt`
    pub fn new(expr: Expr, span: FileSpan) -> Self {
        Self { expr, span }
    }
}

/// `if` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    /// Init statement
    pub init: Option<SimpleStmt>,
    /// Condition
    pub condition: Expr,
    /// Then body
    pub then_block: Block,
    /// Else branch
    pub else_branch: Option<ElseBranch>,
    /// Source location
    pub span: FileSpan,
}

impl IfStmt {
    /// Create a new `IfStmt`
    pub fn new(
        init: Option<SimpleStmt>,
        condition: Expr,
        then_block: Block,
        else_branch: Option<ElseBranch>,
        span: FileSpan,
    ) -> Self {
        Self {
            init,
            condition,
            then_block,
            else_branch,
            span,
        }
    }
}

/// Branch after `else`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElseBranch {
    /// Else body
    Block(Block),
    /// `else if` chain
    If(Box<IfStmt>),
}

/// `switch` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    /// Node form
    pub kind: SwitchStmtKind,
    /// Source location
    pub span: FileSpan,
}

impl SwitchStmt {
    /// Create a new `SwitchStmt`
    pub fn new(kind: SwitchStmtKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Switch form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SwitchStmtKind {
    /// Expression switch
    Expr(ExprSwitchStmt),
    /// Type switch
    Type(TypeSwitchStmt),
}

/// Expression switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprSwitchStmt {
    /// Init statement
    pub init: Option<SimpleStmt>,
    /// Switched expression
    pub subject: Option<Expr>,
    /// Case clauses in source order
    pub clauses: Vec<ExprCaseClause>,
    /// Source location
    pub span: FileSpan,
}

impl ExprSwitchStmt {
    /// Create a new `ExprSwitchStmt`
    pub fn new(
        init: Option<SimpleStmt>,
        subject: Option<Expr>,
        clauses: Vec<ExprCaseClause>,
        span: FileSpan,
    ) -> Self {
        Self {
            init,
            subject,
            clauses,
            span,
        }
    }
}

/// Case clause of an expression switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprCaseClause {
    /// Case label
    pub case: ExprSwitchCase,
    /// Clause statements
    pub statements: Vec<Stmt>,
    /// Source location
    pub span: FileSpan,
}

impl ExprCaseClause {
    /// Create a new `ExprCaseClause`
    pub fn new(case: ExprSwitchCase, statements: Vec<Stmt>, span: FileSpan) -> Self {
        Self {
            case,
            statements,
            span,
        }
    }

    /// Whether this is the `_` clause
    pub fn is_default(&self) -> bool {
        self.case.is_default()
    }
}

/// Case label of an expression switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprSwitchCase {
    /// Node form
    pub kind: ExprSwitchCaseKind,
    /// Source location
    pub span: FileSpan,
}

impl ExprSwitchCase {
    /// Create a new `ExprSwitchCase`
    pub fn new(kind: ExprSwitchCaseKind, span: FileSpan) -> Self {
        Self { kind, span }
    }

    /// Whether this is the `_` label
    pub fn is_default(&self) -> bool {
        matches!(self.kind, ExprSwitchCaseKind::Default)
    }

    /// Case expressions, unless this is the `_` label
    pub fn expressions(&self) -> Option<&ExpressionList> {
        match &self.kind {
            ExprSwitchCaseKind::Default => None,
            ExprSwitchCaseKind::Expressions(list) => Some(list),
        }
    }
}

/// Expression case form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprSwitchCaseKind {
    /// The wildcard case `_`
    Default,
    /// `case a, b`
    Expressions(ExpressionList),
}

/// Type switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSwitchStmt {
    /// Init statement
    pub init: Option<SimpleStmt>,
    /// Guard
    pub guard: TypeSwitchGuard,
    /// Case clauses in source order
    pub clauses: Vec<TypeCaseClause>,
    /// Source location
    pub span: FileSpan,
}

impl TypeSwitchStmt {
    /// Create a new `TypeSwitchStmt`
    pub fn new(
        init: Option<SimpleStmt>,
        guard: TypeSwitchGuard,
        clauses: Vec<TypeCaseClause>,
        span: FileSpan,
    ) -> Self {
        Self {
            init,
            guard,
            clauses,
            span,
        }
    }
}

/// `binding := expr.(type)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSwitchGuard {
    /// Bound name, for `v := x.(type)`
    pub binding: Option<String>,
    /// Switched expression
    pub expr: PrimaryExpr,
    /// Source location
    pub span: FileSpan,
}

impl TypeSwitchGuard {
    /// Create a new `TypeSwitchGuard`
    pub fn new(binding: Option<String>, expr: PrimaryExpr, span: FileSpan) -> Self {
        Self {
            binding,
            expr,
            span,
        }
    }
}

/// Case clause of a type switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCaseClause {
    /// Case label
    pub case: TypeSwitchCase,
    /// Clause statements
    pub statements: Vec<Stmt>,
    /// Source location
    pub span: FileSpan,
}

impl TypeCaseClause {
    /// Create a new `TypeCaseClause`
    pub fn new(case: TypeSwitchCase, statements: Vec<Stmt>, span: FileSpan) -> Self {
        Self {
            case,
            statements,
            span,
        }
    }

    /// Whether this is the `_` clause
    pub fn is_default(&self) -> bool {
        matches!(self.case.kind, TypeSwitchCaseKind::Default)
    }
}

/// Case label of a type switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSwitchCase {
    /// Node form
    pub kind: TypeSwitchCaseKind,
    /// Source location
    pub span: FileSpan,
}

impl TypeSwitchCase {
    /// Create a new `TypeSwitchCase`
    pub fn new(kind: TypeSwitchCaseKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Type case form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSwitchCaseKind {
    /// `_` label
    Default,
    /// `case T1, T2`
    Types(Vec<Type>),
}

/// `select` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    /// Communication clauses
    pub clauses: Vec<CommClause>,
    /// Source location
    pub span: FileSpan,
}

impl SelectStmt {
    /// Create a new `SelectStmt`
    pub fn new(clauses: Vec<CommClause>, span: FileSpan) -> Self {
        Self { clauses, span }
    }
}

/// Communication clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommClause {
    /// Case label
    pub case: CommCase,
    /// Clause body
    pub body: Block,
    /// Source location
    pub span: FileSpan,
}

impl CommClause {
    /// Create a new `CommClause`
    pub fn new(case: CommCase, body: Block, span: FileSpan) -> Self {
        Self { case, body, span }
    }

    /// Whether this is the `_` clause
    pub fn is_default(&self) -> bool {
        matches!(self.case.kind, CommCaseKind::Default)
    }
}

/// Case label of a communication clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommCase {
    /// Node form
    pub kind: CommCaseKind,
    /// Source location
    pub span: FileSpan,
}

impl CommCase {
    /// Create a new `CommCase`
    pub fn new(kind: CommCaseKind, span: FileSpan) -> Self {
        Self { kind, span }
    }
}

/// Communication case form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommCaseKind {
    /// `_` label
    Default,
    /// Send case
    Send(SendStmt),
    /// Receive case
    Recv(RecvStmt),
}

/// Receive case of a select: `[targets =|:=] <-ch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecvStmt {
    /// Receiving targets
    pub targets: Option<RecvTargets>,
    /// Receive expression
    pub expr: Expr,
    /// Source location
    pub span: FileSpan,
}

impl RecvStmt {
    /// Create a new `RecvStmt`
    pub fn new(targets: Option<RecvTargets>, expr: Expr, span: FileSpan) -> Self {
        Self {
            targets,
            expr,
            span,
        }
    }
}

/// Targets of a receive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecvTargets {
    /// `a, b = <-ch`
    Assign(ExpressionList),
    /// `a, b := <-ch`
    Define(IdentifierList),
}

/// `for` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    /// Loop header
    pub header: ForHeader,
    /// Loop body
    pub body: Block,
    /// Source location
    pub span: FileSpan,
}

impl ForStmt {
    /// Create a new `ForStmt`
    pub fn new(header: ForHeader, body: Block, span: FileSpan) -> Self {
        Self { header, body, span }
    }
}

/// Loop header form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForHeader {
    /// Three-part clause
    Clause(ForClause),
    /// `range` clause
    Range(RangeClause),
    /// Condition only
    Condition(Expr),
    /// No header
    Infinite,
}

/// `init; condition; post`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForClause {
    /// Init statement
    pub init: Option<SimpleStmt>,
    /// Condition
    pub condition: Option<Expr>,
    /// Post statement
    pub post: Option<SimpleStmt>,
    /// Source location
    pub span: FileSpan,
}

impl ForClause {
    /// Create a new `ForClause`
    pub fn new(
        init: Option<SimpleStmt>,
        condition: Option<Expr>,
        post: Option<SimpleStmt>,
        span: FileSpan,
    ) -> Self {
        Self {
            init,
            condition,
            post,
            span,
        }
    }
}

/// `range` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeClause {
    /// Bindings
    pub bindings: Option<RangeBindings>,
    /// Ranged expression
    pub expr: Expr,
    /// Source location
    pub span: FileSpan,
}

impl RangeClause {
    /// Create a new `RangeClause`
    pub fn new(bindings: Option<RangeBindings>, expr: Expr, span: FileSpan) -> Self {
        Self {
            bindings,
            expr,
            span,
        }
    }
}

/// Bindings of a `range` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeBindings {
    /// `k, v := range`
    Define(IdentifierList),
    /// `k, v = range`
    Assign(ExpressionList),
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_span::{FileId, Span};

    fn at(start: u32, end: u32) -> FileSpan {
        FileSpan::new(FileId(0), Span::new(start, end), 1)
    }

    #[test]
    fn empty_statement_is_a_newline() {
        let empty = EmptyStmt::new(at(0, 1));
        assert_eq!(empty.text, "\n");
    }

    #[test]
    fn default_case_has_no_expressions() {
        let clause = ExprCaseClause::new(
            ExprSwitchCase::new(ExprSwitchCaseKind::Default, at(5, 6)),
            Vec::new(),
            at(0, 10),
        );
        assert!(clause.is_default());
        assert!(clause.case.expressions().is_none());
    }

    #[test]
    fn statement_round_trips_through_json() {
        let stmt = Stmt::new(StmtKind::Break { label: Some("outer".into()) }, at(0, 11));
        let json = serde_json::to_string(&stmt).unwrap();
        let back: Stmt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stmt);
    }
}
